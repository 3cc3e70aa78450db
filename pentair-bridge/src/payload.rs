//! Fixed-layout payloads for every message kind. Each type mirrors a
//! packed C struct from the original firmware one-for-one: field
//! order and width are load-bearing, not implementation detail.
//!
//! "Unknown" fields are kept here (so a round-trip through the codec
//! is byte-faithful) but are not surfaced in the state snapshot.

fn be16(hi: u8, lo: u8) -> u16 {
    ((hi as u16) << 8) | lo as u16
}

fn be16_bytes(v: u16) -> [u8; 2] {
    [(v >> 8) as u8, (v & 0xFF) as u8]
}

/// `network_time_t`: hour/minute pair used both for time-of-day and
/// for schedule minute-of-day fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    pub const SIZE: usize = 2;

    pub fn decode(b: &[u8]) -> Self {
        TimeOfDay { hour: b[0], minute: b[1] }
    }

    pub fn encode(&self, out: &mut [u8]) {
        out[0] = self.hour;
        out[1] = self.minute;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalendarDate {
    pub day: u8,
    pub month: u8,
    pub year_since_2000: u8,
}

impl CalendarDate {
    pub const SIZE: usize = 3;

    pub fn decode(b: &[u8]) -> Self {
        CalendarDate { day: b[0], month: b[1], year_since_2000: b[2] }
    }

    pub fn encode(&self, out: &mut [u8]) {
        out[0] = self.day;
        out[1] = self.month;
        out[2] = self.year_since_2000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CtrlSetAck {
    pub acked_type: u8,
}

impl CtrlSetAck {
    pub const SIZE: usize = 1;

    pub fn decode(b: &[u8]) -> Self {
        CtrlSetAck { acked_type: b[0] }
    }

    pub fn encode(&self, out: &mut [u8]) {
        out[0] = self.acked_type;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CtrlCircuitSet {
    pub circuit_plus_1: u8,
    pub value: u8,
}

impl CtrlCircuitSet {
    pub const SIZE: usize = 2;

    pub fn decode(b: &[u8]) -> Self {
        CtrlCircuitSet { circuit_plus_1: b[0], value: b[1] }
    }

    pub fn encode(&self, out: &mut [u8]) {
        out[0] = self.circuit_plus_1;
        out[1] = self.value;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScheduleSlot {
    pub circuit_plus_1: u8,
    pub unknown_1: u8,
    pub start_min: u16,
    pub stop_min: u16,
}

impl ScheduleSlot {
    pub const SIZE: usize = 6;

    pub fn decode(b: &[u8]) -> Self {
        ScheduleSlot {
            circuit_plus_1: b[0],
            unknown_1: b[1],
            start_min: be16(b[2], b[3]),
            stop_min: be16(b[4], b[5]),
        }
    }

    pub fn encode(&self, out: &mut [u8]) {
        out[0] = self.circuit_plus_1;
        out[1] = self.unknown_1;
        out[2..4].copy_from_slice(&be16_bytes(self.start_min));
        out[4..6].copy_from_slice(&be16_bytes(self.stop_min));
    }
}

pub const SCHEDULE_SLOT_COUNT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtrlScheduleResp {
    pub unknown_0to3: [u8; 4],
    pub slots: [ScheduleSlot; SCHEDULE_SLOT_COUNT],
}

impl CtrlScheduleResp {
    pub const SIZE: usize = 4 + ScheduleSlot::SIZE * SCHEDULE_SLOT_COUNT;

    pub fn decode(b: &[u8]) -> Self {
        let mut unknown_0to3 = [0u8; 4];
        unknown_0to3.copy_from_slice(&b[0..4]);

        let mut slots = [ScheduleSlot::default(); SCHEDULE_SLOT_COUNT];
        for (i, slot) in slots.iter_mut().enumerate() {
            let off = 4 + i * ScheduleSlot::SIZE;
            *slot = ScheduleSlot::decode(&b[off..off + ScheduleSlot::SIZE]);
        }

        CtrlScheduleResp { unknown_0to3, slots }
    }

    pub fn encode(&self, out: &mut [u8]) {
        out[0..4].copy_from_slice(&self.unknown_0to3);
        for (i, slot) in self.slots.iter().enumerate() {
            let off = 4 + i * ScheduleSlot::SIZE;
            slot.encode(&mut out[off..off + ScheduleSlot::SIZE]);
        }
    }
}

/// `network_ctrl_state_bcast_t`, the primary heartbeat broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CtrlStateBroadcast {
    pub time: TimeOfDay,
    pub active_lo: u8,
    pub active_hi: u8,
    pub active_3: u8,
    pub active_4: u8,
    pub active_5: u8,
    pub unknown_07: u8,
    pub unknown_08: u8,
    pub modes: u8,
    pub heat_status: u8,
    pub unknown_11: u8,
    pub delay: u8,
    pub unknown_13: u8,
    pub pool_temp: u8,
    pub spa_temp: u8,
    pub unknown_16: u8,
    pub solar_temp_1: u8,
    pub air_temp: u8,
    pub solar_temp_2: u8,
    pub unknown_20: u8,
    pub unknown_21: u8,
    pub heat_src: u8,
    pub heat_src_2: u8,
    pub unknown_24: u8,
    pub unknown_25: u8,
    pub unknown_26: u8,
    pub ocp_id: u16,
}

impl CtrlStateBroadcast {
    pub const SIZE: usize = 29;

    /// Bitmask of circuits 0..15, combining `active_lo`/`active_hi`
    /// (circuits 0-8) with `active_3..active_5` for higher circuits
    /// is left to the caller; circuits 0-8 cover everything the state
    /// snapshot tracks.
    pub fn active_mask(&self) -> u16 {
        be16(self.active_hi, self.active_lo)
    }

    pub fn delay_mask(&self) -> u8 {
        self.delay
    }

    pub fn decode(b: &[u8]) -> Self {
        CtrlStateBroadcast {
            time: TimeOfDay::decode(&b[0..2]),
            active_lo: b[2],
            active_hi: b[3],
            active_3: b[4],
            active_4: b[5],
            active_5: b[6],
            unknown_07: b[7],
            unknown_08: b[8],
            modes: b[9],
            heat_status: b[10],
            unknown_11: b[11],
            delay: b[12],
            unknown_13: b[13],
            pool_temp: b[14],
            spa_temp: b[15],
            unknown_16: b[16],
            solar_temp_1: b[17],
            air_temp: b[18],
            solar_temp_2: b[19],
            unknown_20: b[20],
            unknown_21: b[21],
            heat_src: b[22],
            heat_src_2: b[23],
            unknown_24: b[24],
            unknown_25: b[25],
            unknown_26: b[26],
            ocp_id: be16(b[27], b[28]),
        }
    }

    pub fn encode(&self, out: &mut [u8]) {
        self.time.encode(&mut out[0..2]);
        out[2] = self.active_lo;
        out[3] = self.active_hi;
        out[4] = self.active_3;
        out[5] = self.active_4;
        out[6] = self.active_5;
        out[7] = self.unknown_07;
        out[8] = self.unknown_08;
        out[9] = self.modes;
        out[10] = self.heat_status;
        out[11] = self.unknown_11;
        out[12] = self.delay;
        out[13] = self.unknown_13;
        out[14] = self.pool_temp;
        out[15] = self.spa_temp;
        out[16] = self.unknown_16;
        out[17] = self.solar_temp_1;
        out[18] = self.air_temp;
        out[19] = self.solar_temp_2;
        out[20] = self.unknown_20;
        out[21] = self.unknown_21;
        out[22] = self.heat_src;
        out[23] = self.heat_src_2;
        out[24] = self.unknown_24;
        out[25] = self.unknown_25;
        out[26] = self.unknown_26;
        out[27..29].copy_from_slice(&be16_bytes(self.ocp_id));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CtrlTime {
    pub time: TimeOfDay,
    pub day_of_week: u8,
    pub date: CalendarDate,
    pub clk_speed: u8,
    pub dst_auto: u8,
}

impl CtrlTime {
    pub const SIZE: usize = 8;

    pub fn decode(b: &[u8]) -> Self {
        CtrlTime {
            time: TimeOfDay::decode(&b[0..2]),
            day_of_week: b[2],
            date: CalendarDate::decode(&b[3..6]),
            clk_speed: b[6],
            dst_auto: b[7],
        }
    }

    pub fn encode(&self, out: &mut [u8]) {
        self.time.encode(&mut out[0..2]);
        out[2] = self.day_of_week;
        self.date.encode(&mut out[3..6]);
        out[6] = self.clk_speed;
        out[7] = self.dst_auto;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CtrlVersionResp {
    pub req_id: u8,
    pub major: u8,
    pub minor: u8,
    pub unknown_03to04: [u8; 2],
    pub boot_major: u8,
    pub boot_minor: u8,
    pub unknown_07to16: [u8; 10],
}

impl CtrlVersionResp {
    pub const SIZE: usize = 17;

    pub fn decode(b: &[u8]) -> Self {
        let mut unknown_03to04 = [0u8; 2];
        unknown_03to04.copy_from_slice(&b[3..5]);
        let mut unknown_07to16 = [0u8; 10];
        unknown_07to16.copy_from_slice(&b[7..17]);

        CtrlVersionResp {
            req_id: b[0],
            major: b[1],
            minor: b[2],
            unknown_03to04,
            boot_major: b[5],
            boot_minor: b[6],
            unknown_07to16,
        }
    }

    pub fn encode(&self, out: &mut [u8]) {
        out[0] = self.req_id;
        out[1] = self.major;
        out[2] = self.minor;
        out[3..5].copy_from_slice(&self.unknown_03to04);
        out[5] = self.boot_major;
        out[6] = self.boot_minor;
        out[7..17].copy_from_slice(&self.unknown_07to16);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CtrlHeatResp {
    pub pool_temp: u8,
    pub spa_temp: u8,
    pub air_temp: u8,
    pub pool_set_point: u8,
    pub spa_set_point: u8,
    pub heat_src: u8,
    pub water_temp_3: u8,
    pub water_temp_4: u8,
    pub air_temp_2: u8,
    pub body_3_set_point: u8,
    pub body_4_set_point: u8,
    pub heat_src_3_4: u8,
    pub unknown: u8,
}

impl CtrlHeatResp {
    pub const SIZE: usize = 13;

    pub fn decode(b: &[u8]) -> Self {
        CtrlHeatResp {
            pool_temp: b[0],
            spa_temp: b[1],
            air_temp: b[2],
            pool_set_point: b[3],
            spa_set_point: b[4],
            heat_src: b[5],
            water_temp_3: b[6],
            water_temp_4: b[7],
            air_temp_2: b[8],
            body_3_set_point: b[9],
            body_4_set_point: b[10],
            heat_src_3_4: b[11],
            unknown: b[12],
        }
    }

    pub fn encode(&self, out: &mut [u8]) {
        out[0] = self.pool_temp;
        out[1] = self.spa_temp;
        out[2] = self.air_temp;
        out[3] = self.pool_set_point;
        out[4] = self.spa_set_point;
        out[5] = self.heat_src;
        out[6] = self.water_temp_3;
        out[7] = self.water_temp_4;
        out[8] = self.air_temp_2;
        out[9] = self.body_3_set_point;
        out[10] = self.body_4_set_point;
        out[11] = self.heat_src_3_4;
        out[12] = self.unknown;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CtrlHeatSet {
    pub pool_set_point: u8,
    pub spa_set_point: u8,
    pub heat_src: u8,
    pub unknown: u8,
}

impl CtrlHeatSet {
    pub const SIZE: usize = 4;

    pub fn decode(b: &[u8]) -> Self {
        CtrlHeatSet {
            pool_set_point: b[0],
            spa_set_point: b[1],
            heat_src: b[2],
            unknown: b[3],
        }
    }

    pub fn encode(&self, out: &mut [u8]) {
        out[0] = self.pool_set_point;
        out[1] = self.spa_set_point;
        out[2] = self.heat_src;
        out[3] = self.unknown;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CtrlSchedResp {
    pub sched_id: u8,
    pub circuit: u8,
    pub start: TimeOfDay,
    pub stop: TimeOfDay,
    pub day_of_week: u8,
}

impl CtrlSchedResp {
    pub const SIZE: usize = 7;

    pub fn decode(b: &[u8]) -> Self {
        CtrlSchedResp {
            sched_id: b[0],
            circuit: b[1],
            start: TimeOfDay::decode(&b[2..4]),
            stop: TimeOfDay::decode(&b[4..6]),
            day_of_week: b[6],
        }
    }

    pub fn encode(&self, out: &mut [u8]) {
        out[0] = self.sched_id;
        out[1] = self.circuit;
        self.start.encode(&mut out[2..4]);
        self.stop.encode(&mut out[4..6]);
        out[6] = self.day_of_week;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CtrlLayout {
    pub circuits: [CtrlSchedResp; 4],
}

impl CtrlLayout {
    pub const SIZE: usize = CtrlSchedResp::SIZE * 4;

    pub fn decode(b: &[u8]) -> Self {
        let mut circuits = [CtrlSchedResp::default(); 4];
        for (i, c) in circuits.iter_mut().enumerate() {
            let off = i * CtrlSchedResp::SIZE;
            *c = CtrlSchedResp::decode(&b[off..off + CtrlSchedResp::SIZE]);
        }
        CtrlLayout { circuits }
    }

    pub fn encode(&self, out: &mut [u8]) {
        for (i, c) in self.circuits.iter().enumerate() {
            let off = i * CtrlSchedResp::SIZE;
            c.encode(&mut out[off..off + CtrlSchedResp::SIZE]);
        }
    }
}

macro_rules! raw_bytes_payload {
    ($name:ident, $size:expr) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub [u8; $size]);

        impl $name {
            pub const SIZE: usize = $size;

            pub fn decode(b: &[u8]) -> Self {
                let mut raw = [0u8; $size];
                raw.copy_from_slice(b);
                $name(raw)
            }

            pub fn encode(&self, out: &mut [u8]) {
                out.copy_from_slice(&self.0);
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name([0u8; $size])
            }
        }
    };
}

raw_bytes_payload!(CtrlValveResp, 24);
raw_bytes_payload!(CtrlSolarpumpResp, 3);
raw_bytes_payload!(CtrlDelayResp, 2);
raw_bytes_payload!(CtrlHeatSetptResp, 10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CtrlCircNamesReq {
    pub req_id: u8,
}

impl CtrlCircNamesReq {
    pub const SIZE: usize = 1;

    pub fn decode(b: &[u8]) -> Self {
        CtrlCircNamesReq { req_id: b[0] }
    }

    pub fn encode(&self, out: &mut [u8]) {
        out[0] = self.req_id;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CtrlCircNamesResp {
    pub req_id: u8,
    pub unknown: [u8; 5],
}

impl CtrlCircNamesResp {
    pub const SIZE: usize = 6;

    pub fn decode(b: &[u8]) -> Self {
        let mut unknown = [0u8; 5];
        unknown.copy_from_slice(&b[1..6]);
        CtrlCircNamesResp { req_id: b[0], unknown }
    }

    pub fn encode(&self, out: &mut [u8]) {
        out[0] = self.req_id;
        out[1..6].copy_from_slice(&self.unknown);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CtrlChemReq {
    pub unknown: u8,
}

impl CtrlChemReq {
    pub const SIZE: usize = 1;

    pub fn decode(b: &[u8]) -> Self {
        CtrlChemReq { unknown: b[0] }
    }

    pub fn encode(&self, out: &mut [u8]) {
        out[0] = self.unknown;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CtrlSchedsReq {
    pub sched_id: u8,
}

impl CtrlSchedsReq {
    pub const SIZE: usize = 1;

    pub fn decode(b: &[u8]) -> Self {
        CtrlSchedsReq { sched_id: b[0] }
    }

    pub fn encode(&self, out: &mut [u8]) {
        out[0] = self.sched_id;
    }
}

pub type CtrlSchedsResp = CtrlSchedResp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PumpRegSet {
    pub address: u8,
    pub operation: u8,
    pub value: u16,
}

impl PumpRegSet {
    pub const SIZE: usize = 4;

    pub fn decode(b: &[u8]) -> Self {
        PumpRegSet { address: b[0], operation: b[1], value: be16(b[2], b[3]) }
    }

    pub fn encode(&self, out: &mut [u8]) {
        out[0] = self.address;
        out[1] = self.operation;
        out[2..4].copy_from_slice(&be16_bytes(self.value));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PumpRegResp {
    pub value: u16,
}

impl PumpRegResp {
    pub const SIZE: usize = 2;

    pub fn decode(b: &[u8]) -> Self {
        PumpRegResp { value: be16(b[0], b[1]) }
    }

    pub fn encode(&self, out: &mut [u8]) {
        out[0..2].copy_from_slice(&be16_bytes(self.value));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PumpCtrl {
    pub raw: u8,
}

impl PumpCtrl {
    pub const SIZE: usize = 1;

    pub fn decode(b: &[u8]) -> Self {
        PumpCtrl { raw: b[0] }
    }

    pub fn encode(&self, out: &mut [u8]) {
        out[0] = self.raw;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PumpRunMode {
    pub raw: u8,
}

impl PumpRunMode {
    pub const SIZE: usize = 1;

    pub fn decode(b: &[u8]) -> Self {
        PumpRunMode { raw: b[0] }
    }

    pub fn encode(&self, out: &mut [u8]) {
        out[0] = self.raw;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PumpRunning {
    pub raw: u8,
}

impl PumpRunning {
    pub const SIZE: usize = 1;

    pub fn decode(b: &[u8]) -> Self {
        PumpRunning { raw: b[0] }
    }

    pub fn encode(&self, out: &mut [u8]) {
        out[0] = self.raw;
    }

    pub fn is_on(self) -> bool {
        self.raw == 0x0A
    }

    pub fn is_off(self) -> bool {
        self.raw == 0x04
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PumpStatusResp {
    pub running: PumpRunning,
    pub mode: PumpRunMode,
    pub state: u8,
    pub power_w: u16,
    pub speed_rpm: u16,
    pub flow_gpm: u8,
    pub level_pct: u8,
    pub unknown: u8,
    pub error: u8,
    pub remaining: TimeOfDay,
    pub clock: TimeOfDay,
}

impl PumpStatusResp {
    pub const SIZE: usize = 15;

    pub fn decode(b: &[u8]) -> Self {
        PumpStatusResp {
            running: PumpRunning::decode(&b[0..1]),
            mode: PumpRunMode::decode(&b[1..2]),
            state: b[2],
            power_w: be16(b[3], b[4]),
            speed_rpm: be16(b[5], b[6]),
            flow_gpm: b[7],
            level_pct: b[8],
            unknown: b[9],
            error: b[10],
            remaining: TimeOfDay::decode(&b[11..13]),
            clock: TimeOfDay::decode(&b[13..15]),
        }
    }

    pub fn encode(&self, out: &mut [u8]) {
        out[0] = self.running.raw;
        out[1] = self.mode.raw;
        out[2] = self.state;
        out[3..5].copy_from_slice(&be16_bytes(self.power_w));
        out[5..7].copy_from_slice(&be16_bytes(self.speed_rpm));
        out[7] = self.flow_gpm;
        out[8] = self.level_pct;
        out[9] = self.unknown;
        out[10] = self.error;
        self.remaining.encode(&mut out[11..13]);
        self.clock.encode(&mut out[13..15]);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChlorControlReq {
    pub sub_cmd: u8,
}

impl ChlorControlReq {
    pub const SIZE: usize = 1;

    pub fn decode(b: &[u8]) -> Self {
        ChlorControlReq { sub_cmd: b[0] }
    }

    pub fn encode(&self, out: &mut [u8]) {
        out[0] = self.sub_cmd;
    }
}

raw_bytes_payload!(ChlorControlResp, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChlorModelReq {
    pub typ: u8,
}

impl ChlorModelReq {
    pub const SIZE: usize = 1;

    pub fn decode(b: &[u8]) -> Self {
        ChlorModelReq { typ: b[0] }
    }

    pub fn encode(&self, out: &mut [u8]) {
        out[0] = self.typ;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChlorModelResp {
    pub salt_raw: u8,
}

impl ChlorModelResp {
    pub const SIZE: usize = 1;

    pub fn decode(b: &[u8]) -> Self {
        ChlorModelResp { salt_raw: b[0] }
    }

    pub fn encode(&self, out: &mut [u8]) {
        out[0] = self.salt_raw;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChlorLevelSet {
    pub level_pct: u8,
}

impl ChlorLevelSet {
    pub const SIZE: usize = 1;

    pub fn decode(b: &[u8]) -> Self {
        ChlorLevelSet { level_pct: b[0] }
    }

    pub fn encode(&self, out: &mut [u8]) {
        out[0] = self.level_pct;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChlorLevelSet10 {
    pub level_times_10: u8,
}

impl ChlorLevelSet10 {
    pub const SIZE: usize = 1;

    pub fn decode(b: &[u8]) -> Self {
        ChlorLevelSet10 { level_times_10: b[0] }
    }

    pub fn encode(&self, out: &mut [u8]) {
        out[0] = self.level_times_10;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChlorLevelResp {
    pub salt_raw: u8,
    pub error: u8,
}

impl ChlorLevelResp {
    pub const SIZE: usize = 2;

    pub fn decode(b: &[u8]) -> Self {
        ChlorLevelResp { salt_raw: b[0], error: b[1] }
    }

    pub fn encode(&self, out: &mut [u8]) {
        out[0] = self.salt_raw;
        out[1] = self.error;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChlorIChlorBroadcast {
    pub level_pct: u8,
    pub temp: u8,
}

impl ChlorIChlorBroadcast {
    pub const SIZE: usize = 2;

    pub fn decode(b: &[u8]) -> Self {
        ChlorIChlorBroadcast { level_pct: b[0], temp: b[1] }
    }

    pub fn encode(&self, out: &mut [u8]) {
        out[0] = self.level_pct;
        out[1] = self.temp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_broadcast_round_trips() {
        let msg = CtrlStateBroadcast {
            time: TimeOfDay { hour: 9, minute: 31 },
            active_lo: 0x40,
            active_hi: 0x00,
            pool_temp: 0x56,
            spa_temp: 0x56,
            solar_temp_1: 0x4E,
            ocp_id: 0x02EF,
            ..Default::default()
        };

        let mut buf = [0u8; CtrlStateBroadcast::SIZE];
        msg.encode(&mut buf);
        assert_eq!(CtrlStateBroadcast::decode(&buf), msg);
    }

    #[test]
    fn schedule_resp_round_trips() {
        let msg = CtrlScheduleResp {
            unknown_0to3: [0; 4],
            slots: [
                ScheduleSlot { circuit_plus_1: 6, unknown_1: 0, start_min: 600, stop_min: 1920 },
                ScheduleSlot::default(),
            ],
        };

        let mut buf = [0u8; CtrlScheduleResp::SIZE];
        msg.encode(&mut buf);
        assert_eq!(CtrlScheduleResp::decode(&buf), msg);
    }
}
