//! Cubic single-zone building: five opaque walls, one glazed wall,
//! ventilation, and an HVAC system modelled as a proportional controller.
//!
//! The envelope is concrete outside, insulation inside; each slab is split
//! at mid-width so the slab's capacity sits between two half-conductances.
//! Long-wave exchange between the indoor wall surface and the glass is
//! linearized around a mean radiant temperature and folded, with the two
//! surface resistances, into one equivalent branch. The controller enters
//! as a boundary branch of conductance Kp carrying the set-point
//! temperature into the zone air: Kp -> 0 is free-running, large Kp pins
//! the air at the set point.

use nalgebra::DVector;
use tn_core::units::{constants::SIGMA_SB, jpk, wpk};
use tn_core::{BranchId, NodeId};
use tn_model::{ModelResult, SourceLayout};
use tn_network::{series, Network, NetworkBuilder};

use crate::{ScenarioError, ScenarioResult};

// Thermophysical properties. Conductivity W/(m K), density kg/m3, specific
// heat J/(kg K), width m.
const AIR_DENSITY: f64 = 1.2;
const AIR_SPECIFIC_HEAT: f64 = 1000.0;

const CONCRETE_CONDUCTIVITY: f64 = 1.4;
const CONCRETE_DENSITY: f64 = 2300.0;
const CONCRETE_SPECIFIC_HEAT: f64 = 880.0;
const CONCRETE_WIDTH: f64 = 0.2;

const INSULATION_CONDUCTIVITY: f64 = 0.027;
const INSULATION_DENSITY: f64 = 55.0;
const INSULATION_SPECIFIC_HEAT: f64 = 1210.0;
const INSULATION_WIDTH: f64 = 0.08;

const GLASS_CONDUCTIVITY: f64 = 1.4;
const GLASS_DENSITY: f64 = 2500.0;
const GLASS_SPECIFIC_HEAT: f64 = 750.0;
const GLASS_WIDTH: f64 = 0.004;

/// Long-wave emissivities and the wall-to-glass view factor.
const EMISSIVITY_WALL: f64 = 0.85;
const EMISSIVITY_GLASS: f64 = 0.90;
const VIEW_FACTOR_WALL_GLASS: f64 = 0.2;

/// Convection film coefficients, W/(m2 K).
const H_INDOOR: f64 = 8.0;
const H_OUTDOOR: f64 = 25.0;

/// Configuration for the cubic building scenario.
#[derive(Debug, Clone, Copy)]
pub struct CubeBuilding {
    /// Edge length of the cube, m.
    pub edge_m: f64,
    /// Air infiltration, volumes per hour.
    pub air_changes_per_hour: f64,
    /// Proportional controller gain, W/K. Zero disables the HVAC branch
    /// (free-running building).
    pub controller_gain_w_per_k: f64,
    /// Mean radiant temperature for long-wave linearization, K.
    pub mean_radiant_temp_k: f64,
}

impl Default for CubeBuilding {
    fn default() -> Self {
        Self {
            edge_m: 3.0,
            air_changes_per_hour: 1.0,
            controller_gain_w_per_k: 0.0,
            mean_radiant_temp_k: 293.15,
        }
    }
}

/// The assembled cube circuit with named handles.
///
/// Input order follows the source layout: temperature sources on the
/// outdoor-wall, outdoor-glass, and ventilation branches (plus the HVAC
/// set point when the controller is active), then flow sources on the
/// outdoor wall surface, the indoor wall surface, the zone air, and the
/// glass. Use [`CubeModel::pack_inputs`] instead of building u by hand.
#[derive(Debug)]
pub struct CubeModel {
    pub network: Network,
    pub layout: SourceLayout,

    pub outdoor_surface: NodeId,
    pub concrete_core: NodeId,
    pub wall_interface: NodeId,
    pub insulation_core: NodeId,
    pub indoor_surface: NodeId,
    pub glass_indoor_surface: NodeId,
    pub indoor_air: NodeId,
    pub glass: NodeId,

    pub outdoor_branch: BranchId,
    pub glass_outdoor_branch: BranchId,
    pub ventilation_branch: BranchId,
    pub hvac_branch: Option<BranchId>,

    controller_gain: f64,
}

impl CubeBuilding {
    /// Assemble the network and source layout.
    pub fn build(&self) -> ScenarioResult<CubeModel> {
        if !(self.edge_m > 0.0 && self.edge_m.is_finite()) {
            return Err(ScenarioError::InvalidParameter {
                what: "edge length must be positive and finite",
            });
        }
        if !(self.air_changes_per_hour > 0.0 && self.air_changes_per_hour.is_finite()) {
            return Err(ScenarioError::InvalidParameter {
                what: "air change rate must be positive and finite",
            });
        }
        if !(self.controller_gain_w_per_k >= 0.0 && self.controller_gain_w_per_k.is_finite()) {
            return Err(ScenarioError::InvalidParameter {
                what: "controller gain must be finite and non-negative",
            });
        }
        if !(self.mean_radiant_temp_k > 0.0 && self.mean_radiant_temp_k.is_finite()) {
            return Err(ScenarioError::InvalidParameter {
                what: "mean radiant temperature must be positive and finite",
            });
        }

        let edge = self.edge_m;
        let glass_area = edge * edge;
        let wall_area = 5.0 * glass_area;
        let air_volume = edge * edge * edge;

        let g_cd = |conductivity: f64, width: f64, area: f64| conductivity / width * area;
        let slab_capacity =
            |density: f64, specific_heat: f64, width: f64, area: f64| {
                density * specific_heat * width * area
            };

        // Half-slab conduction conductances.
        let g_concrete_half = 2.0 * g_cd(CONCRETE_CONDUCTIVITY, CONCRETE_WIDTH, wall_area);
        let g_insulation_half = 2.0 * g_cd(INSULATION_CONDUCTIVITY, INSULATION_WIDTH, wall_area);
        let g_glass_half = 2.0 * g_cd(GLASS_CONDUCTIVITY, GLASS_WIDTH, glass_area);

        // Linearized long-wave chain: surface resistance, view-factor
        // resistance, surface resistance, folded into one branch.
        let four_sigma_t3 = 4.0 * SIGMA_SB * self.mean_radiant_temp_k.powi(3);
        let g_lw = series(&[
            four_sigma_t3 * EMISSIVITY_WALL / (1.0 - EMISSIVITY_WALL) * wall_area,
            four_sigma_t3 * VIEW_FACTOR_WALL_GLASS * wall_area,
            four_sigma_t3 * EMISSIVITY_GLASS / (1.0 - EMISSIVITY_GLASS) * glass_area,
        ])?;

        // Outdoor glass film in series with half the pane.
        let g_glass_outdoor = series(&[H_OUTDOOR * glass_area, g_glass_half])?;

        // Advection by infiltration.
        let volumetric_flow = self.air_changes_per_hour / 3600.0 * air_volume;
        let g_ventilation = AIR_DENSITY * AIR_SPECIFIC_HEAT * volumetric_flow;

        let mut builder = NetworkBuilder::new();
        let outdoor_surface = builder.add_node("wall outdoor surface");
        let concrete_core = builder.add_capacitive_node(
            "concrete core",
            jpk(slab_capacity(
                CONCRETE_DENSITY,
                CONCRETE_SPECIFIC_HEAT,
                CONCRETE_WIDTH,
                wall_area,
            )),
        );
        let wall_interface = builder.add_node("concrete-insulation interface");
        let insulation_core = builder.add_capacitive_node(
            "insulation core",
            jpk(slab_capacity(
                INSULATION_DENSITY,
                INSULATION_SPECIFIC_HEAT,
                INSULATION_WIDTH,
                wall_area,
            )),
        );
        let indoor_surface = builder.add_node("wall indoor surface");
        let glass_indoor_surface = builder.add_node("glass indoor surface");
        let indoor_air = builder.add_capacitive_node(
            "zone air",
            jpk(AIR_DENSITY * AIR_SPECIFIC_HEAT * air_volume),
        );
        let glass = builder.add_capacitive_node(
            "glass",
            jpk(slab_capacity(
                GLASS_DENSITY,
                GLASS_SPECIFIC_HEAT,
                GLASS_WIDTH,
                glass_area,
            )),
        );

        let outdoor_branch = builder.add_boundary_branch(
            "outdoor convection",
            outdoor_surface,
            wpk(H_OUTDOOR * wall_area),
        );
        builder.add_branch_between(
            "concrete outer half",
            outdoor_surface,
            concrete_core,
            wpk(g_concrete_half),
        );
        builder.add_branch_between(
            "concrete inner half",
            concrete_core,
            wall_interface,
            wpk(g_concrete_half),
        );
        builder.add_branch_between(
            "insulation outer half",
            wall_interface,
            insulation_core,
            wpk(g_insulation_half),
        );
        builder.add_branch_between(
            "insulation inner half",
            insulation_core,
            indoor_surface,
            wpk(g_insulation_half),
        );
        builder.add_branch_between(
            "long-wave wall-glass",
            indoor_surface,
            glass_indoor_surface,
            wpk(g_lw),
        );
        builder.add_branch_between(
            "indoor wall convection",
            indoor_surface,
            indoor_air,
            wpk(H_INDOOR * wall_area),
        );
        builder.add_branch_between(
            "indoor glass convection",
            glass_indoor_surface,
            indoor_air,
            wpk(H_INDOOR * glass_area),
        );
        let glass_outdoor_branch =
            builder.add_boundary_branch("outdoor glass film", glass, wpk(g_glass_outdoor));
        builder.add_branch_between(
            "glass inner half",
            glass,
            glass_indoor_surface,
            wpk(g_glass_half),
        );
        let ventilation_branch =
            builder.add_boundary_branch("ventilation", indoor_air, wpk(g_ventilation));

        let hvac_branch = if self.controller_gain_w_per_k > 0.0 {
            Some(builder.add_boundary_branch(
                "hvac",
                indoor_air,
                wpk(self.controller_gain_w_per_k),
            ))
        } else {
            None
        };

        let network = builder.build()?;

        let mut layout = SourceLayout::builder(&network)
            .temperature_source(outdoor_branch)
            .temperature_source(glass_outdoor_branch)
            .temperature_source(ventilation_branch)
            .flow_source(outdoor_surface)
            .flow_source(indoor_surface)
            .flow_source(indoor_air)
            .flow_source(glass)
            .output(indoor_air);
        if let Some(branch) = hvac_branch {
            layout = layout.temperature_source(branch);
        }
        let layout = layout.build()?;

        Ok(CubeModel {
            network,
            layout,
            outdoor_surface,
            concrete_core,
            wall_interface,
            insulation_core,
            indoor_surface,
            glass_indoor_surface,
            indoor_air,
            glass,
            outdoor_branch,
            glass_outdoor_branch,
            ventilation_branch,
            hvac_branch,
            controller_gain: self.controller_gain_w_per_k,
        })
    }
}

impl CubeModel {
    /// Heat delivered by the proportional controller for an observed zone
    /// temperature: q_hvac = Kp (T_sp - theta_air). Zero when free-running.
    pub fn hvac_power(&self, setpoint: f64, indoor_temp: f64) -> f64 {
        self.controller_gain * (setpoint - indoor_temp)
    }

    /// Assemble the input vector from physical source values: outdoor
    /// temperature, set point (ignored when free-running), solar gains on
    /// the outdoor and indoor wall surfaces and on the glass, and auxiliary
    /// zone gains.
    pub fn pack_inputs(
        &self,
        outdoor_temp: f64,
        setpoint: f64,
        solar_outdoor_wall: f64,
        solar_indoor_wall: f64,
        aux_gains: f64,
        solar_glass: f64,
    ) -> ModelResult<DVector<f64>> {
        let (b, f) = self.source_vectors(
            outdoor_temp,
            setpoint,
            solar_outdoor_wall,
            solar_indoor_wall,
            aux_gains,
            solar_glass,
        );
        self.layout.pack(&b, &f)
    }

    /// Full-length per-branch temperature sources b and per-node flow
    /// sources f for the direct DAE solvers, matching
    /// [`CubeModel::pack_inputs`].
    pub fn source_vectors(
        &self,
        outdoor_temp: f64,
        setpoint: f64,
        solar_outdoor_wall: f64,
        solar_indoor_wall: f64,
        aux_gains: f64,
        solar_glass: f64,
    ) -> (DVector<f64>, DVector<f64>) {
        let mut b = DVector::zeros(self.network.branch_count());
        b[self.outdoor_branch.index() as usize] = outdoor_temp;
        b[self.glass_outdoor_branch.index() as usize] = outdoor_temp;
        b[self.ventilation_branch.index() as usize] = outdoor_temp;
        if let Some(branch) = self.hvac_branch {
            b[branch.index() as usize] = setpoint;
        }

        let mut f = DVector::zeros(self.network.node_count());
        f[self.outdoor_surface.index() as usize] = solar_outdoor_wall;
        f[self.indoor_surface.index() as usize] = solar_indoor_wall;
        f[self.indoor_air.index() as usize] = aux_gains;
        f[self.glass.index() as usize] = solar_glass;

        (b, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_running_topology() {
        let model = CubeBuilding::default().build().unwrap();
        assert_eq!(model.network.node_count(), 8);
        assert_eq!(model.network.branch_count(), 11);
        assert!(model.hvac_branch.is_none());
        // Three temperature sources, four flow sources.
        assert_eq!(model.layout.input_count(), 7);
        assert_eq!(model.layout.output_count(), 1);
    }

    #[test]
    fn controlled_topology_adds_hvac_branch() {
        let model = CubeBuilding {
            controller_gain_w_per_k: 1e4,
            ..Default::default()
        }
        .build()
        .unwrap();
        assert_eq!(model.network.branch_count(), 12);
        assert!(model.hvac_branch.is_some());
        assert_eq!(model.layout.input_count(), 8);
    }

    #[test]
    fn conductances_match_hand_values() {
        let model = CubeBuilding::default().build().unwrap();
        let g = model.network.conductances();
        // h_out * 5 l^2
        assert!((g[model.outdoor_branch.index() as usize] - 1125.0).abs() < 1e-9);
        // rho c ACH/3600 * l^3
        assert!((g[model.ventilation_branch.index() as usize] - 9.0).abs() < 1e-9);
        // 2 lambda/w S for the concrete halves
        assert!((g[1] - 630.0).abs() < 1e-9);
        assert!((g[3] - 30.375).abs() < 1e-9);
    }

    #[test]
    fn capacities_match_hand_values() {
        let model = CubeBuilding::default().build().unwrap();
        let c = model.network.capacities();
        assert!((c[model.concrete_core.index() as usize] - 18_216_000.0).abs() < 1.0);
        assert!((c[model.insulation_core.index() as usize] - 239_580.0).abs() < 1e-3);
        assert!((c[model.indoor_air.index() as usize] - 32_400.0).abs() < 1e-9);
        assert!((c[model.glass.index() as usize] - 67_500.0).abs() < 1e-9);
    }

    #[test]
    fn pack_orders_temperature_then_flow_sources() {
        let model = CubeBuilding {
            controller_gain_w_per_k: 100.0,
            ..Default::default()
        }
        .build()
        .unwrap();
        let u = model.pack_inputs(10.0, 20.0, 1.0, 2.0, 3.0, 4.0).unwrap();
        assert_eq!(u.len(), 8);
        // To on branches 0, 8, 10; set point on branch 11; then flow
        // sources on nodes 0, 4, 6, 7.
        assert_eq!(u.as_slice(), &[10.0, 10.0, 10.0, 20.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(CubeBuilding {
            edge_m: 0.0,
            ..Default::default()
        }
        .build()
        .is_err());
        assert!(CubeBuilding {
            controller_gain_w_per_k: -1.0,
            ..Default::default()
        }
        .build()
        .is_err());
        assert!(CubeBuilding {
            mean_radiant_temp_k: f64::NAN,
            ..Default::default()
        }
        .build()
        .is_err());
    }

    #[test]
    fn hvac_power_is_proportional() {
        let model = CubeBuilding {
            controller_gain_w_per_k: 500.0,
            ..Default::default()
        }
        .build()
        .unwrap();
        assert_eq!(model.hvac_power(20.0, 18.0), 1000.0);
        assert_eq!(model.hvac_power(20.0, 22.0), -1000.0);

        let free = CubeBuilding::default().build().unwrap();
        assert_eq!(free.hvac_power(20.0, 0.0), 0.0);
    }
}
