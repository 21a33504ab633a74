// pr-core/src/units.rs

use uom::si::f64::{
    MolarEnergy as UomMolarEnergy, MolarHeatCapacity as UomMolarHeatCapacity,
    Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type MolarEnergy = UomMolarEnergy;
pub type MolarEntropy = UomMolarHeatCapacity;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn mpa(v: f64) -> Pressure {
    use uom::si::pressure::megapascal;
    Pressure::new::<megapascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn j_per_mol(v: f64) -> MolarEnergy {
    use uom::si::molar_energy::joule_per_mole;
    MolarEnergy::new::<joule_per_mole>(v)
}

#[inline]
pub fn j_per_mol_k(v: f64) -> MolarEntropy {
    use uom::si::molar_heat_capacity::joule_per_kelvin_mole;
    MolarEntropy::new::<joule_per_kelvin_mole>(v)
}

pub mod constants {
    /// Universal gas constant [J/(mol·K)] used by the equation-of-state model.
    pub const R_J_PER_MOL_K: f64 = 8.314_462_1;

    /// Standard atmosphere [Pa].
    pub const ATM_PA: f64 = 101_325.0;

    /// Pounds per square inch [Pa].
    pub const PSI_PA: f64 = 6_894.76;
}
