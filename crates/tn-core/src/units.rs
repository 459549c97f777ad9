// tn-core/src/units.rs

use uom::si::f64::{
    HeatCapacity as UomHeatCapacity, Power as UomPower,
    TemperatureInterval as UomTemperatureInterval,
    ThermalConductance as UomThermalConductance,
    ThermodynamicTemperature as UomThermodynamicTemperature, Time as UomTime,
};

// Public canonical unit types (SI, f64)
pub type HeatCapacity = UomHeatCapacity;
pub type Power = UomPower;
pub type TempInterval = UomTemperatureInterval;
pub type Temperature = UomThermodynamicTemperature;
pub type ThermalConductance = UomThermalConductance;
pub type Time = UomTime;

/// Thermal conductance in watts per kelvin.
#[inline]
pub fn wpk(v: f64) -> ThermalConductance {
    use uom::si::thermal_conductance::watt_per_kelvin;
    ThermalConductance::new::<watt_per_kelvin>(v)
}

/// Heat capacity in joules per kelvin.
#[inline]
pub fn jpk(v: f64) -> HeatCapacity {
    use uom::si::heat_capacity::joule_per_kelvin;
    HeatCapacity::new::<joule_per_kelvin>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn w(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

pub mod constants {
    /// Stefan-Boltzmann constant, W/(m^2 K^4).
    pub const SIGMA_SB: f64 = 5.67e-8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _g = wpk(10.0);
        let _c = jpk(1000.0);
        let _t = k(293.15);
        let _p = w(100.0);
        let _dt = s(240.0);
    }

    #[test]
    fn si_base_values() {
        // The network matrices consume raw SI magnitudes; constructors must
        // land on W/K and J/K base values exactly.
        assert_eq!(wpk(12.5).value, 12.5);
        assert_eq!(jpk(18e6).value, 18e6);
    }
}
