//! The canonical snapshot of everything the bridge has observed about
//! the pool. Every leaf is a `Field<T>`: a value paired with whether
//! anything has ever set it. The snapshot starts zeroed and is
//! mutated only by the state updater; readers take an owned copy.

use pentair_api::Address;

/// Number of circuits tracked: SPA, AUX1, AUX2, AUX3, FEATURE1, POOL,
/// FEATURE2, FEATURE3, FEATURE4, matching the controller's own
/// circuit numbering (`circuit_plus_1 - 1` indexes this array).
pub const CIRCUIT_COUNT: usize = 9;

/// Pumps are addressed by the low nibble of a pump-group address
/// (`0x60..0x6F`); this bridge mirrors that many slots regardless of
/// how many are actually wired up.
pub const PUMP_COUNT: usize = 8;

/// A value together with whether it has ever been populated. `value`
/// is meaningless while `valid` is false; readers must check it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Field<T> {
    pub valid: bool,
    pub value: T,
}

impl<T> Field<T> {
    pub fn set(&mut self, value: T) {
        self.valid = true;
        self.value = value;
    }
}

/// `network_pool_circuit_t`: the controller's own circuit index,
/// shared between `Circuits` and `Schedules`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum Circuit {
    Spa = 0,
    Aux1 = 1,
    Aux2 = 2,
    Aux3 = 3,
    Feature1 = 4,
    Pool = 5,
    Feature2 = 6,
    Feature3 = 7,
    Feature4 = 8,
}

impl Circuit {
    /// `circuit_plus_1` as carried on the wire is one-based; `0`
    /// means "no circuit" and has no `Circuit` value.
    pub fn from_plus_1(circuit_plus_1: u8) -> Option<Self> {
        use Circuit::*;
        match circuit_plus_1.checked_sub(1)? {
            0 => Some(Spa),
            1 => Some(Aux1),
            2 => Some(Aux2),
            3 => Some(Aux3),
            4 => Some(Feature1),
            5 => Some(Pool),
            6 => Some(Feature2),
            7 => Some(Feature3),
            8 => Some(Feature4),
            _ => None,
        }
    }
}

/// The two hydraulic bodies, each with its own thermostat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum Body {
    Pool = 0,
    Spa = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum TempSensor {
    Air = 0,
    Water = 1,
}

/// `network_heat_src_t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeatSource {
    #[default]
    None,
    Heat,
    SolarPreferred,
    Solar,
}

impl HeatSource {
    pub fn from_nibble(bits: u8) -> Self {
        match bits & 0x0F {
            1 => HeatSource::Heat,
            2 => HeatSource::SolarPreferred,
            3 => HeatSource::Solar,
            _ => HeatSource::None,
        }
    }
}

/// `uint8_heat_status_t` combined with the source's mode flags, one
/// struct per thermostat-owning body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Thermostat {
    pub current_temp: Field<u8>,
    pub set_point: Field<u8>,
    pub heat_src: Field<HeatSource>,
    pub heating: Field<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CircuitState {
    pub active: Field<bool>,
    pub delay: Field<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Schedule {
    pub valid: Field<bool>,
    pub active: Field<bool>,
    pub start_min: Field<u16>,
    pub stop_min: Field<u16>,
}

/// Firmware version pair reported in `CtrlVersionResp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeFlags {
    pub service: bool,
    pub temp_increase: bool,
    pub freeze_protection: bool,
    pub timeout: bool,
}

impl ModeFlags {
    pub fn from_bits(bits: u8) -> Self {
        ModeFlags {
            service: bits & 0x01 != 0,
            temp_increase: bits & 0x04 != 0,
            freeze_protection: bits & 0x08 != 0,
            timeout: bits & 0x10 != 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalendarDate {
    pub day: u8,
    pub month: u8,
    pub year_since_2000: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct System {
    /// Address snooped from the `src` of any controller-originated
    /// message; commands use this as `dst` once learned.
    pub controller: Field<Address>,
    pub tod: Field<TimeOfDay>,
    pub date: Field<CalendarDate>,
    pub modes: Field<ModeFlags>,
    pub version: Field<Version>,
}

impl Default for System {
    fn default() -> Self {
        System {
            controller: Field { valid: false, value: Address::new(0) },
            tod: Field::default(),
            date: Field::default(),
            modes: Field::default(),
            version: Field::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pump {
    pub clock: Field<TimeOfDay>,
    pub mode: Field<u8>,
    pub running: Field<bool>,
    pub state: Field<u8>,
    pub power_w: Field<u16>,
    pub flow_gpm: Field<u8>,
    pub speed_rpm: Field<u16>,
    pub level_pct: Field<u8>,
    pub error: Field<u8>,
    pub remaining: Field<TimeOfDay>,
}

/// `network_chlor_status_t`-equivalent, derived from `ChlorLevelResp`
/// error bits; `Other` is the fallback for any combination the
/// source doesn't name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChlorStatus {
    #[default]
    Ok,
    LowFlow,
    LowSalt,
    HighSalt,
    CleanCell,
    Cold,
    Other,
}

impl ChlorStatus {
    pub fn from_error_bits(bits: u8) -> Self {
        match bits {
            b if b & 0x01 != 0 => ChlorStatus::LowFlow,
            b if b & 0x02 != 0 => ChlorStatus::LowSalt,
            b if b & 0x04 != 0 => ChlorStatus::HighSalt,
            b if b & 0x10 != 0 => ChlorStatus::CleanCell,
            b if b & 0x40 != 0 => ChlorStatus::Cold,
            b if b & 0x80 != 0 => ChlorStatus::Ok,
            _ => ChlorStatus::Other,
        }
    }
}

pub const CHLOR_NAME_LEN: usize = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chlorinator {
    pub name: Field<[u8; CHLOR_NAME_LEN]>,
    pub level_pct: Field<u8>,
    pub salt_ppm: Field<u16>,
    pub status: Field<ChlorStatus>,
}

impl Default for Chlorinator {
    fn default() -> Self {
        Chlorinator {
            name: Field { valid: false, value: [0u8; CHLOR_NAME_LEN] },
            level_pct: Field::default(),
            salt_ppm: Field::default(),
            status: Field::default(),
        }
    }
}

/// The full pool snapshot. Owned by `bus_task`; readers obtain a
/// `Copy`-cheap clone via a snapshot read, never a reference that
/// outlives one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    pub system: System,
    /// Air and water, indexed by `TempSensor`.
    pub temps: [Field<u8>; 2],
    /// Pool and spa, indexed by `Body`.
    pub thermostats: [Thermostat; 2],
    pub circuits: [CircuitState; CIRCUIT_COUNT],
    pub schedules: [Schedule; CIRCUIT_COUNT],
    pub pumps: [Pump; PUMP_COUNT],
    pub chlorinator: Chlorinator,
}

impl Default for State {
    fn default() -> Self {
        State {
            system: System::default(),
            temps: [Field::default(); 2],
            thermostats: [Thermostat::default(); 2],
            circuits: [CircuitState::default(); CIRCUIT_COUNT],
            schedules: [Schedule::default(); CIRCUIT_COUNT],
            pumps: [Pump::default(); PUMP_COUNT],
            chlorinator: Chlorinator::default(),
        }
    }
}

impl State {
    pub fn new() -> Self {
        State::default()
    }

    pub fn temp(&self, which: TempSensor) -> Field<u8> {
        self.temps[which as usize]
    }

    pub fn thermostat(&self, body: Body) -> &Thermostat {
        &self.thermostats[body as usize]
    }

    pub fn circuit(&self, c: Circuit) -> &CircuitState {
        &self.circuits[c as usize]
    }

    pub fn schedule(&self, c: Circuit) -> &Schedule {
        &self.schedules[c as usize]
    }

    pub fn pump(&self, id: u8) -> Option<&Pump> {
        self.pumps.get(id as usize)
    }

    pub fn pump_mut(&mut self, id: u8) -> Option<&mut Pump> {
        self.pumps.get_mut(id as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circuit_from_plus_1_matches_controller_numbering() {
        assert_eq!(Circuit::from_plus_1(6), Some(Circuit::Pool));
        assert_eq!(Circuit::from_plus_1(1), Some(Circuit::Spa));
        assert_eq!(Circuit::from_plus_1(0), None);
    }

    #[test]
    fn mode_flags_decode_known_bits() {
        let modes = ModeFlags::from_bits(0x01 | 0x08);
        assert!(modes.service);
        assert!(modes.freeze_protection);
        assert!(!modes.temp_increase);
        assert!(!modes.timeout);
    }

    #[test]
    fn chlor_status_prefers_lowest_set_bit() {
        assert_eq!(ChlorStatus::from_error_bits(0x01 | 0x80), ChlorStatus::LowFlow);
        assert_eq!(ChlorStatus::from_error_bits(0x80), ChlorStatus::Ok);
        assert_eq!(ChlorStatus::from_error_bits(0x00), ChlorStatus::Other);
    }

    #[test]
    fn fresh_state_is_all_invalid() {
        let s = State::new();
        assert!(!s.system.tod.valid);
        assert!(!s.thermostat(Body::Pool).current_temp.valid);
        assert!(!s.chlorinator.salt_ppm.valid);
    }
}
