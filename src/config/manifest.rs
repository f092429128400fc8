use serde::{Deserialize, Serialize};

use super::throttle::ThrottleClass;

/// One output file of the split pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub file_name: String,
    pub components: Vec<String>,
    pub description: String,
}

impl CategoryGroup {
    pub fn new(file_name: &str, components: &[&str], description: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            components: components.iter().map(|c| c.to_string()).collect(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrottleAssignment {
    pub component: String,
    pub class: ThrottleClass,
}

fn assign(class: ThrottleClass, components: &[&str]) -> Vec<ThrottleAssignment> {
    components
        .iter()
        .map(|c| ThrottleAssignment {
            component: c.to_string(),
            class,
        })
        .collect()
}

pub fn default_throttle_assignments() -> Vec<ThrottleAssignment> {
    let mut out = Vec::new();
    out.extend(assign(ThrottleClass::Particle, &["ExhaustSmoke"]));
    out.extend(assign(
        ThrottleClass::Light,
        &["DOTMarkerLights", "DockStatusLight", "TruckAlignmentGuides"],
    ));
    out.extend(assign(
        ThrottleClass::SlowAnimation,
        &[
            "RollUpDoor",
            "DockShelter",
            "DockLeveler",
            "DockPlate",
            "WheelChock",
            "DockForklift",
            "DockSpotter",
            "WarehouseWorkerWithPalletJack",
            "WeightScale",
            "YardJockey",
            "GuardShack",
            "MudflapWithChains",
            "AirHoseStation",
            "ScaleTicketKiosk",
            "StretchWrapMachine",
            "PalletJackChargingStation",
            "OverheadCrane",
            "CardboardCompactor",
            "IntercomCallBox",
            "TruckWashStation",
            "TimeClockStation",
        ],
    ));
    out.extend(assign(ThrottleClass::MediumAnimation, &["ReeferUnit"]));
    out.extend(assign(ThrottleClass::Smooth, &["RealisticTruck"]));
    out
}

pub fn default_memoized() -> Vec<String> {
    [
        "TrafficCone",
        "SpeedBump",
        "ConcreteBollard",
        "FifthWheelCoupling",
        "GladHands",
        "ICCReflectiveTape",
        "SlidingTandemAxles",
        "ManifestHolder",
        "FuelTank",
        "AirTank",
        "LandingGear",
        "DEFTank",
        "CBAntennaComponent",
        "SunVisor",
        "TireInspectionArea",
        "FuelIsland",
        "NoIdlingSign",
        "PalletStaging",
        "HeadlightBeam",
        "LicensePlate",
        "GrainCoLogo",
        "FlourExpressLogo",
        "TPMSSensor",
        "TrailerLockRods",
        "TrailerSkirts",
        "DriverRestroom",
        "TrailerDropYard",
        "MaintenanceBay",
        "DockBumperWithWear",
        "DockFloorMarkings",
        "SafetyMirror",
        "FireExtinguisherStation",
        "HazmatPlacard",
        "DriverBreakRoom",
        "EmployeeParking",
        "PropaneTankCage",
        "DumpsterArea",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

pub fn default_categories() -> Vec<CategoryGroup> {
    vec![
        CategoryGroup::new(
            "AtmosphericEffects.tsx",
            &[
                "Cobweb",
                "RustStain",
                "OilPuddle",
                "RainPuddle",
                "RoofLeakPuddle",
                "WindowCondensation",
                "CeilingWaterStain",
                "GodRays",
                "DustBunny",
            ],
            "Atmospheric and weather effects",
        ),
        CategoryGroup::new(
            "FactoryProps.tsx",
            &[
                "StackedPallets",
                "ToolRack",
                "HardHatHook",
                "CleaningEquipment",
                "OilDrum",
                "GasCylinder",
                "Toolbox",
                "TrashBin",
                "CoffeeCup",
                "Sawhorse",
                "MaintenanceCart",
                "VendingMachine",
                "TimeClockStation",
            ],
            "Static factory props and decorations",
        ),
        CategoryGroup::new(
            "IndustrialDetails.tsx",
            &[
                "CableTray",
                "DrainageGrate",
                "ExhaustFan",
                "ElectricalPanel",
                "SwingingChain",
                "PressureGauge",
                "ValveWheel",
                "PASpeaker",
                "AlarmBell",
                "LoadingDockDoor",
            ],
            "Industrial equipment and infrastructure",
        ),
        CategoryGroup::new(
            "SafetyEquipment.tsx",
            &[
                "SafetySign",
                "FireExtinguisherStation",
                "EmergencyShower",
                "EyeWashStation",
                "EarPlugDispenser",
                "SafetyGogglesRack",
                "FirstAidKit",
                "AccidentBoard",
            ],
            "Safety equipment and signage",
        ),
        CategoryGroup::new(
            "ControlSystems.tsx",
            &[
                "ControlPanel",
                "ControlPanelLED",
                "VibrationIndicator",
                "FactoryWallClock",
                "OutOfOrderSign",
                "OpenedPanel",
            ],
            "Control panels and monitoring systems",
        ),
        CategoryGroup::new(
            "PersonalItems.tsx",
            &[
                "JacketOnHook",
                "UmbrellaCorner",
                "LunchBag",
                "WaterBottle",
                "FoldedNewspaper",
                "CigaretteButts",
                "StuckGum",
                "StickyNote",
                "ScatteredPens",
                "ExtensionCord",
            ],
            "Personal items and micro-details",
        ),
        CategoryGroup::new(
            "AmbientLife.tsx",
            &["Pigeon", "Mouse", "Flies", "Spider", "MothSwarm", "Cockroach"],
            "Ambient creatures and wildlife",
        ),
        CategoryGroup::new(
            "DecorativeElements.tsx",
            &[
                "Graffiti",
                "BulletinBoard",
                "ScorchMark",
                "ChalkOutline",
                "EmployeeOfMonth",
                "OldRadio",
                "BirthdayDecorations",
                "WallCalendar",
            ],
            "Decorative and storytelling elements",
        ),
    ]
}
