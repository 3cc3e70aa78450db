//! The application-level message: a protocol packet decoded all the
//! way down to named, typed fields. This is what the state updater
//! consumes and what `submit_command` accepts.

use pentair_api::Address;

use crate::payload::*;

/// Every message kind the bridge understands, each carrying its own
/// fixed-layout payload (or none, for request/poll messages with an
/// empty body). The codec table in `codec.rs` is the single source
/// of truth for how a `Kind` maps to wire bytes; this enum is what
/// the rest of the bridge actually operates on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kind {
    /// Header decoded to a type byte with no row in the codec table,
    /// or a row whose payload size didn't match. Carries no data and
    /// triggers no state change.
    Ignore,

    PumpRegSet(PumpRegSet),
    PumpRegResp(PumpRegResp),
    PumpRegVfSet(PumpRegSet),
    PumpRegVfResp(PumpRegResp),
    PumpRegVsSet(PumpRegSet),
    PumpRegVsResp(PumpRegResp),
    PumpRemoteCtrlSet(PumpCtrl),
    PumpRemoteCtrlResp(PumpCtrl),
    PumpRunModeSet(PumpRunMode),
    PumpRunModeResp(PumpRunMode),
    PumpRunSet(PumpRunning),
    PumpRunResp(PumpRunning),
    PumpStatusReq,
    PumpStatusResp(PumpStatusResp),

    CtrlSetAck(CtrlSetAck),
    CtrlCircuitSet(CtrlCircuitSet),
    CtrlSchedReq,
    CtrlScheduleResp(CtrlScheduleResp),
    CtrlStateBroadcast(CtrlStateBroadcast),
    CtrlTimeReq,
    CtrlTimeResp(CtrlTime),
    CtrlTimeSet(CtrlTime),
    CtrlHeatReq,
    CtrlHeatResp(CtrlHeatResp),
    CtrlHeatSet(CtrlHeatSet),
    CtrlLayoutReq,
    CtrlLayoutResp(CtrlLayout),
    CtrlLayoutSet(CtrlLayout),
    CtrlValveReq,
    CtrlValveResp(CtrlValveResp),
    CtrlVersionReq,
    CtrlVersionResp(CtrlVersionResp),
    CtrlSolarpumpReq,
    CtrlSolarpumpResp(CtrlSolarpumpResp),
    CtrlDelayReq,
    CtrlDelayResp(CtrlDelayResp),
    CtrlHeatSetptReq,
    CtrlHeatSetptResp(CtrlHeatSetptResp),
    CtrlCircNamesReq(CtrlCircNamesReq),
    CtrlCircNamesResp(CtrlCircNamesResp),
    CtrlSchedsReq(CtrlSchedsReq),
    CtrlSchedsResp(CtrlSchedsResp),
    CtrlChemReq(CtrlChemReq),

    ChlorControlReq(ChlorControlReq),
    ChlorControlResp(ChlorControlResp),
    ChlorModelReq(ChlorModelReq),
    ChlorModelResp(ChlorModelResp),
    ChlorLevelSet(ChlorLevelSet),
    ChlorLevelSet10(ChlorLevelSet10),
    ChlorLevelResp(ChlorLevelResp),
    ChlorIChlorBroadcast(ChlorIChlorBroadcast),
}

/// A fully decoded protocol message, addressed and kind-tagged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Message {
    pub src: Address,
    pub dst: Address,
    pub kind: Kind,
}

impl Message {
    pub fn new(src: Address, dst: Address, kind: Kind) -> Self {
        Message { src, dst, kind }
    }
}
