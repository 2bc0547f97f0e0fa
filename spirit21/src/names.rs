//!
//! # Naming & Reference Resolver
//!
//! Every derived interface/port/parameter identifier and every string-valued
//! dependency formula in the emitted descriptor comes from this module.
//! Centralizing them here is what guarantees the bus-interface, address-space,
//! memory-map, port, and parameter sections agree byte-for-byte on the
//! qualified identifier joining them.
//!

// Local imports
use crate::data::{AxiSignal, Endpoint, Thread, WidthField};

/// The qualified identifier joining all sections describing one endpoint:
/// `{thread}_{endpoint}_AXI`.
pub fn qualified_id(thread: &Thread, endpoint: &Endpoint) -> String {
    format!("{}_{}_AXI", thread.name, endpoint.name)
}
/// Physical port name for protocol signal `signal` of interface `qid`.
pub fn port_name(qid: &str, signal: AxiSignal) -> String {
    format!("{}_{}", qid, signal)
}
/// Per-interface clock port name.
pub fn clock_port(qid: &str) -> String {
    format!("{}_ACLK", qid)
}
/// Per-interface reset port name.
pub fn reset_port(qid: &str) -> String {
    format!("{}_ARESETN", qid)
}
/// Width parameter name: `C_{qid}_{FIELD}`.
pub fn width_param(qid: &str, field: WidthField) -> String {
    format!("C_{}_{}", qid, field)
}
/// Top-level parameter value identifier: `PARAM_VALUE.{name}`.
pub fn param_id(name: &str) -> String {
    format!("PARAM_VALUE.{}", name)
}
/// Model parameter value identifier: `MODELPARAM_VALUE.{name}`.
pub fn modelparam_id(name: &str) -> String {
    format!("MODELPARAM_VALUE.{}", name)
}
/// Bus-interface parameter value identifier: `BUSIFPARAM_VALUE.{qid}.{param}`.
pub fn busifparam_id(qid: &str, param: &str) -> String {
    format!("BUSIFPARAM_VALUE.{}.{}", qid, param)
}
/// Externally-supplied base-address symbol for a slave memory map.
pub fn base_addr_symbol(qid: &str) -> String {
    format!("C_{}_BASEADDR", qid)
}
/// Externally-supplied high-address symbol for a slave memory map.
pub fn high_addr_symbol(qid: &str) -> String {
    format!("C_{}_HIGHADDR", qid)
}
/// Address-block indirection parameter id. Note the consuming format's
/// upper-case `_REG` here vs. lower-case `_reg` in [addr_block_dependency].
pub fn addr_block_id(qid: &str, param: &str) -> String {
    format!("ADDRBLOCKPARAM_VALUE.{}_REG.{}", qid, param)
}
/// Address-block indirection parameter dependency.
pub fn addr_block_dependency(qid: &str, param: &str) -> String {
    format!("ADDRBLOCKPARAM_VALUE.{}_reg.{}", qid, param)
}

// Dependency formulas. These are textual expressions evaluated by the
// downstream tool, never computed here.

/// Decode expression over a model parameter:
/// `spirit:decode(id('MODELPARAM_VALUE.C_{qid}_{FIELD}'))`.
pub fn decode_modelparam(qid: &str, field: WidthField) -> String {
    format!(
        "spirit:decode(id('MODELPARAM_VALUE.C_{}_{}'))",
        qid, field
    )
}
/// Vector left-bound formula for a parameter-sized port: `({decode}-1)`.
pub fn vector_msb(qid: &str, field: WidthField) -> String {
    format!("({}-1)", decode_modelparam(qid, field))
}
/// Vector left-bound formula for the write-strobe port: `({decode}/8-1)`.
pub fn strobe_msb(qid: &str) -> String {
    format!("({}/8-1)", decode_modelparam(qid, WidthField::Data))
}
/// Self-referential formula clamping a top-level width parameter to a minimum
/// of one bit: zero-or-negative settings resolve to 1.
pub fn clamp_min_one(qid: &str, field: WidthField) -> String {
    let id = format!("PARAM_VALUE.C_{}_{}", qid, field);
    format!(
        "((spirit:decode(id('{}')) <= 0 ) + (spirit:decode(id('{}'))))",
        id, id
    )
}
/// Address-space range formula: two to the power of the resolved address width.
pub fn space_range_dependency(qid: &str) -> String {
    format!(
        "pow(2,(spirit:decode(id('MODELPARAM_VALUE.C_{}_ADDR_WIDTH')) - 1) + 1)",
        qid
    )
}
/// Address-space width formula: the resolved data width.
pub fn space_width_dependency(qid: &str) -> String {
    format!(
        "(spirit:decode(id('MODELPARAM_VALUE.C_{}_DATA_WIDTH')) - 1) + 1",
        qid
    )
}
