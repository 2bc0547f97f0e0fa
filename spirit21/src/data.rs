//!
//! # Spirit21 Data Model
//!
//! Input-side types describing the component being packaged: threads, their typed
//! AXI endpoints, and the generator configuration. Also home to the crate-wide
//! error type and the static AXI signal tables shared by every emitter.
//!

// Crates.io Imports
use derive_builder::Builder;
use once_cell::sync::Lazy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// Spirit21 Imports
use crate::utils::{enumstr, EnumStr};

enumstr!(
    /// # AXI Protocol Signal Suffixes
    ///
    /// Every signal of the memory-mapped burst protocol, in channel order
    /// (AW, W, B, AR, R). This ordering is shared by the bus-interface port maps
    /// and the physical port list, which must agree entry-for-entry.
    AxiSignal {
        AwId: "AWID",
        AwAddr: "AWADDR",
        AwLen: "AWLEN",
        AwSize: "AWSIZE",
        AwBurst: "AWBURST",
        AwLock: "AWLOCK",
        AwCache: "AWCACHE",
        AwProt: "AWPROT",
        AwQos: "AWQOS",
        AwUser: "AWUSER",
        AwValid: "AWVALID",
        AwReady: "AWREADY",
        WData: "WDATA",
        WStrb: "WSTRB",
        WLast: "WLAST",
        WUser: "WUSER",
        WValid: "WVALID",
        WReady: "WREADY",
        BId: "BID",
        BResp: "BRESP",
        BUser: "BUSER",
        BValid: "BVALID",
        BReady: "BREADY",
        ArId: "ARID",
        ArAddr: "ARADDR",
        ArLen: "ARLEN",
        ArSize: "ARSIZE",
        ArBurst: "ARBURST",
        ArLock: "ARLOCK",
        ArCache: "ARCACHE",
        ArProt: "ARPROT",
        ArQos: "ARQOS",
        ArUser: "ARUSER",
        ArValid: "ARVALID",
        ArReady: "ARREADY",
        RId: "RID",
        RData: "RDATA",
        RResp: "RRESP",
        RLast: "RLAST",
        RUser: "RUSER",
        RValid: "RVALID",
        RReady: "RREADY",
    }
);

/// The full 42-signal AXI list, in emission order.
pub const FULL_SIGNALS: [AxiSignal; 42] = [
    AxiSignal::AwId,
    AxiSignal::AwAddr,
    AxiSignal::AwLen,
    AxiSignal::AwSize,
    AxiSignal::AwBurst,
    AxiSignal::AwLock,
    AxiSignal::AwCache,
    AxiSignal::AwProt,
    AxiSignal::AwQos,
    AxiSignal::AwUser,
    AxiSignal::AwValid,
    AxiSignal::AwReady,
    AxiSignal::WData,
    AxiSignal::WStrb,
    AxiSignal::WLast,
    AxiSignal::WUser,
    AxiSignal::WValid,
    AxiSignal::WReady,
    AxiSignal::BId,
    AxiSignal::BResp,
    AxiSignal::BUser,
    AxiSignal::BValid,
    AxiSignal::BReady,
    AxiSignal::ArId,
    AxiSignal::ArAddr,
    AxiSignal::ArLen,
    AxiSignal::ArSize,
    AxiSignal::ArBurst,
    AxiSignal::ArLock,
    AxiSignal::ArCache,
    AxiSignal::ArProt,
    AxiSignal::ArQos,
    AxiSignal::ArUser,
    AxiSignal::ArValid,
    AxiSignal::ArReady,
    AxiSignal::RId,
    AxiSignal::RData,
    AxiSignal::RResp,
    AxiSignal::RLast,
    AxiSignal::RUser,
    AxiSignal::RValid,
    AxiSignal::RReady,
];

/// The 19-signal AXI-Lite subset, in the same relative order as [FULL_SIGNALS].
/// Omits the transaction-ID, burst, lock, cache, QoS, and sideband-user signals.
pub const LITE_SIGNALS: [AxiSignal; 19] = [
    AxiSignal::AwAddr,
    AxiSignal::AwProt,
    AxiSignal::AwValid,
    AxiSignal::AwReady,
    AxiSignal::WData,
    AxiSignal::WStrb,
    AxiSignal::WValid,
    AxiSignal::WReady,
    AxiSignal::BResp,
    AxiSignal::BValid,
    AxiSignal::BReady,
    AxiSignal::ArAddr,
    AxiSignal::ArProt,
    AxiSignal::ArValid,
    AxiSignal::ArReady,
    AxiSignal::RData,
    AxiSignal::RResp,
    AxiSignal::RValid,
    AxiSignal::RReady,
];

/// The 23 signals removed by the lite policy, i.e. [FULL_SIGNALS] minus [LITE_SIGNALS].
pub static LITE_REMOVED: Lazy<Vec<AxiSignal>> = Lazy::new(|| {
    FULL_SIGNALS
        .iter()
        .copied()
        .filter(|s| !LITE_SIGNALS.contains(s))
        .collect()
});

/// Retrieve the signal list for an interface.
/// Lite behavior is membership-filtering of the full list,
/// keeping the two lists in a single relative order.
pub fn signal_list(lite: bool) -> Vec<AxiSignal> {
    if lite {
        FULL_SIGNALS
            .iter()
            .copied()
            .filter(|s| LITE_SIGNALS.contains(s))
            .collect()
    } else {
        FULL_SIGNALS.to_vec()
    }
}

impl AxiSignal {
    /// Direction of the signal as driven by a bus master.
    pub fn master_direction(&self) -> PortDirection {
        use AxiSignal::*;
        match self {
            AwReady | WReady | BId | BResp | BUser | BValid | ArReady | RId | RData | RResp
            | RLast | RUser | RValid => PortDirection::In,
            _ => PortDirection::Out,
        }
    }
    /// Direction of the signal for a given bus role. Slaves see the mirror image.
    pub fn direction(&self, role: BusRole) -> PortDirection {
        match role {
            BusRole::Master => self.master_direction(),
            BusRole::Slave => self.master_direction().flipped(),
        }
    }
    /// Bit-range shape of the signal's physical port.
    pub fn shape(&self) -> SignalShape {
        use AxiSignal::*;
        match self {
            AwId | BId | ArId | RId => SignalShape::Id,
            AwAddr | ArAddr => SignalShape::Addr,
            WData | RData => SignalShape::Data,
            WStrb => SignalShape::Strobe,
            AwUser => SignalShape::User(WidthField::AwUser),
            ArUser => SignalShape::User(WidthField::ArUser),
            WUser => SignalShape::User(WidthField::WUser),
            RUser => SignalShape::User(WidthField::RUser),
            BUser => SignalShape::User(WidthField::BUser),
            AwLen | ArLen => SignalShape::Fixed(7),
            AwCache | ArCache | AwQos | ArQos => SignalShape::Fixed(3),
            AwSize | ArSize | AwProt | ArProt => SignalShape::Fixed(2),
            AwBurst | ArBurst | AwLock | ArLock | BResp | RResp => SignalShape::Fixed(1),
            AwValid | AwReady | WLast | WValid | WReady | BValid | BReady | ArValid | ArReady
            | RLast | RValid | RReady => SignalShape::Scalar,
        }
    }
}

/// # Signal Port Shapes
///
/// The bit-range of a signal's physical port: a scalar wire, a fixed-width literal
/// vector (stored as its most-significant bit index), or a parameter-dependent
/// vector resolved against one of the endpoint's width parameters.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum SignalShape {
    /// Single-bit wire, no vector emitted
    Scalar,
    /// Fixed literal vector `[msb:0]`
    Fixed(usize),
    /// Sized by the THREAD_ID_WIDTH parameter
    Id,
    /// Sized by the ADDR_WIDTH parameter
    Addr,
    /// Sized by the DATA_WIDTH parameter
    Data,
    /// Write-strobe, one bit per data byte (DATA_WIDTH/8)
    Strobe,
    /// Sized by one of the sideband-user width parameters
    User(WidthField),
}

enumstr!(
    /// # Port Directions
    PortDirection {
        In: "in",
        Out: "out",
        InOut: "inout",
    }
);
impl PortDirection {
    /// Mirror-image direction, as seen from the other side of the bus.
    pub fn flipped(&self) -> Self {
        match self {
            Self::In => Self::Out,
            Self::Out => Self::In,
            Self::InOut => Self::InOut,
        }
    }
}

enumstr!(
    /// # Extra-Parameter Value Types
    ParamType {
        Integer: "integer",
        String: "string",
    }
);

enumstr!(
    /// # Tunable Width-Parameter Name Suffixes
    ///
    /// One variant per per-endpoint tunable field, in the fixed emission order:
    /// THREAD_ID, ADDR, DATA, then the five sideband-user widths.
    WidthField {
        ThreadId: "THREAD_ID_WIDTH",
        Addr: "ADDR_WIDTH",
        Data: "DATA_WIDTH",
        AwUser: "AWUSER_WIDTH",
        ArUser: "ARUSER_WIDTH",
        WUser: "WUSER_WIDTH",
        RUser: "RUSER_WIDTH",
        BUser: "BUSER_WIDTH",
    }
);

/// All per-endpoint width fields, in emission order.
pub const FULL_WIDTH_FIELDS: [WidthField; 8] = [
    WidthField::ThreadId,
    WidthField::Addr,
    WidthField::Data,
    WidthField::AwUser,
    WidthField::ArUser,
    WidthField::WUser,
    WidthField::RUser,
    WidthField::BUser,
];

/// The lite subset: address and data widths only.
pub const LITE_WIDTH_FIELDS: [WidthField; 2] = [WidthField::Addr, WidthField::Data];

/// Retrieve the tunable width fields emitted for an endpoint.
/// Shared by the model-parameter and top-level-parameter passes,
/// which must traverse fields in identical order.
pub fn width_fields(lite: bool) -> &'static [WidthField] {
    if lite {
        &LITE_WIDTH_FIELDS
    } else {
        &FULL_WIDTH_FIELDS
    }
}

/// # Bus Roles
///
/// Bus-initiator vs. bus-responder polarity of an endpoint's generated interface.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum BusRole {
    Master,
    Slave,
}

/// # Endpoint Roles
///
/// The five endpoint flavors. Role determines bus polarity, whether an address
/// space (master) or memory map (slave) is emitted, and lite-policy eligibility.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum EndpointRole {
    Memory,
    InStream,
    OutStream,
    IoChannel,
    IoRegister,
}
impl EndpointRole {
    /// Master/slave polarity of the generated bus interface.
    pub fn bus_role(&self) -> BusRole {
        match self {
            Self::Memory | Self::InStream | Self::OutStream => BusRole::Master,
            Self::IoChannel | Self::IoRegister => BusRole::Slave,
        }
    }
    /// Whether the lite field-suppression policy may apply to this role.
    /// Master-role endpoints are never reduced.
    pub fn lite_eligible(&self) -> bool {
        matches!(self.bus_role(), BusRole::Slave)
    }
}

/// # Endpoint
///
/// A typed communication port attached to a [Thread]. The role is carried by
/// which of the thread's lists it lives in; the payload here is role-independent.
#[derive(Clone, Default, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct Endpoint {
    /// Endpoint Name
    pub name: String,
    /// Data Width (bits)
    pub data_width: usize,
}
impl Endpoint {
    /// Create a new [Endpoint] named `name` with data width `data_width`.
    pub fn new(name: impl Into<String>, data_width: usize) -> Endpoint {
        Endpoint {
            name: name.into(),
            data_width,
        }
    }
}

/// # Thread
///
/// A named grouping of communication endpoints within the component being
/// described. Owns ordered per-role endpoint lists; traversal order is fixed:
/// memories, instreams, outstreams, iochannels, ioregisters.
#[derive(Clone, Default, Builder, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[builder(pattern = "owned", setter(into))]
pub struct Thread {
    /// Thread Name
    pub name: String,
    /// Master-role endpoints toward external memory
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub memories: Vec<Endpoint>,
    /// Master-role input data streams
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub instreams: Vec<Endpoint>,
    /// Master-role output data streams
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub outstreams: Vec<Endpoint>,
    /// Slave-role control channels
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub iochannels: Vec<Endpoint>,
    /// Slave-role register banks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub ioregisters: Vec<Endpoint>,
}
impl Thread {
    /// Create a new and initially empty [Thread] named `name`.
    pub fn new(name: impl Into<String>) -> Thread {
        Thread {
            name: name.into(),
            ..Default::default()
        }
    }
    /// Iterate over all endpoints in the fixed traversal order.
    /// Every emission pass is driven by this single function, so the
    /// cross-referenced document sections cannot fall out of step.
    pub fn endpoints(&self) -> impl Iterator<Item = (EndpointRole, &Endpoint)> {
        use EndpointRole::*;
        self.memories
            .iter()
            .map(|e| (Memory, e))
            .chain(self.instreams.iter().map(|e| (InStream, e)))
            .chain(self.outstreams.iter().map(|e| (OutStream, e)))
            .chain(self.iochannels.iter().map(|e| (IoChannel, e)))
            .chain(self.ioregisters.iter().map(|e| (IoRegister, e)))
    }
}

/// # Extra Top-Level Port
///
/// Caller-supplied port injected verbatim into the port block,
/// bypassing the endpoint-derived naming scheme.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct ExtraPort {
    /// Port Name
    pub name: String,
    /// Direction
    pub direction: PortDirection,
    /// Most-significant bit of a `[msb:0]` literal vector, or `None` for a scalar
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msb: Option<usize>,
}

/// # Extra Parameter
///
/// Caller-supplied parameter injected verbatim into both parameter blocks.
/// Not tracked by the ordering counter.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct ExtraParam {
    /// Parameter Name
    pub name: String,
    /// Literal Value
    pub value: String,
    /// Value Type
    pub tp: ParamType,
}

/// # Generator Configuration
///
/// The complete, caller-built input to one generation call. Read-only during
/// generation; the engine never mutates it.
#[derive(Clone, Builder, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[builder(pattern = "owned", setter(into))]
pub struct ComponentConfig {
    /// Component Base Name
    pub name: String,
    /// Thread List, in emission order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub threads: Vec<Thread>,
    /// Lite interface-width policy
    #[serde(default)]
    #[builder(default)]
    pub lite: bool,
    /// External address width (bits)
    #[builder(default = "32")]
    pub addr_width: usize,
    /// Maximum burst length. Informational only; carried but never emitted.
    #[builder(default = "256")]
    pub burst_length: usize,
    /// Extra top-level ports, appended verbatim after the derived ports
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub extra_ports: Vec<ExtraPort>,
    /// Extra parameters, appended verbatim to both parameter blocks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub extra_params: Vec<ExtraParam>,

    // Descriptor header fields
    /// Vendor Identifier
    #[builder(default = r#""spirit21".to_string()"#)]
    pub vendor: String,
    /// Library Identifier
    #[builder(default = r#""user".to_string()"#)]
    pub library: String,
    /// Descriptor Version
    #[builder(default = r#""1.0".to_string()"#)]
    pub version: String,
    /// Component Description
    #[builder(default = r#""spirit21 IP-core".to_string()"#)]
    pub description: String,
}
impl ComponentConfig {
    /// Create a new [ComponentConfig] for component `name`, with all defaults.
    pub fn new(name: impl Into<String>) -> ComponentConfig {
        ComponentConfig {
            name: name.into(),
            threads: Vec::new(),
            lite: false,
            addr_width: 32,
            burst_length: 256,
            extra_ports: Vec::new(),
            extra_params: Vec::new(),
            vendor: "spirit21".into(),
            library: "user".into(),
            version: "1.0".into(),
            description: "spirit21 IP-core".into(),
        }
    }
    /// Iterate over all endpoints of all threads, in the fixed traversal order.
    pub fn endpoints(&self) -> impl Iterator<Item = (&Thread, EndpointRole, &Endpoint)> {
        self.threads
            .iter()
            .flat_map(|t| t.endpoints().map(move |(role, ep)| (t, role, ep)))
    }
    /// Whether the lite policy applies to endpoints of `role` under this configuration.
    pub fn lite_applied(&self, role: EndpointRole) -> bool {
        self.lite && role.lite_eligible()
    }
}

/// # Spirit Error Enumeration
#[derive(Debug)]
pub enum SpiritError {
    /// Wrapped errors, generally from other crates
    Boxed(Box<dyn std::error::Error>),
    /// String message-valued errors
    Str(String),
}
impl From<crate::utils::ser::Error> for SpiritError {
    fn from(e: crate::utils::ser::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<std::io::Error> for SpiritError {
    fn from(e: std::io::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<String> for SpiritError {
    /// Convert string-based errors by wrapping them
    fn from(e: String) -> Self {
        Self::Str(e)
    }
}
impl From<&str> for SpiritError {
    /// Convert string-based errors by wrapping them
    fn from(e: &str) -> Self {
        Self::Str(e.into())
    }
}
impl std::fmt::Display for SpiritError {
    /// Delegates to the [Debug] implementation
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        std::fmt::Debug::fmt(self, f)
    }
}
impl std::error::Error for SpiritError {}

/// Spirit21 Library-Wide Result Type
pub type SpiritResult<T> = Result<T, SpiritError>;

// Implement the serialization to/from file trait for configurations
impl crate::utils::SerdeFile for ComponentConfig {}
