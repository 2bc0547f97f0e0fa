//!
//! # Component Descriptor Assembly
//!
//! Builds the `spirit:component` document tree from a [ComponentConfig].
//! Each section is a pure function of the thread/endpoint list and the lite
//! policy; generation is deterministic and the output is byte-identical for
//! identical inputs. Top-level child order is fixed and significant:
//! vendor, library, name, version, busInterfaces, [addressSpaces],
//! [memoryMaps], model, choices, fileSets, description, parameters,
//! vendorExtensions.
//!

// Local imports
use crate::data::*;
use crate::names;
use crate::write;
use crate::xml::Element;

// Document namespaces, in declaration order
const XMLNS_XILINX: &str = "http://www.xilinx.com";
const XMLNS_SPIRIT: &str = "http://www.spiritconsortium.org/XMLSchema/SPIRIT/1685-2009";
const XMLNS_XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";

// Vendor-extension metadata
const SUPPORTED_FAMILY: &str = "zynq";
const TAXONOMY: &str = "AXI_Peripheral";
const PACKAGING_VERSION: &str = "2014.4";

// Static width choice-sets
const WIDTH_CHOICES: [usize; 5] = [32, 64, 128, 256, 512];
const POW2_CHOICES: [usize; 10] = [1, 2, 4, 8, 16, 32, 64, 128, 256, 512];

/// Generate the serialized component descriptor for `cfg`.
pub fn generate(cfg: &ComponentConfig) -> SpiritResult<String> {
    let top = generate_tree(cfg)?;
    write::to_string(&top)
}
/// Generate the component descriptor tree for `cfg`.
pub fn generate_tree(cfg: &ComponentConfig) -> SpiritResult<Element> {
    Ok(ComponentGen { cfg }.component())
}

/// # UI-Ordering Accumulator
///
/// Assigns the display-order index of each tunable width field. Starts at 2;
/// index 1 is reserved for the `Component_Name` parameter. One instance is
/// threaded through each of the two parameter-emission passes, and the
/// recorded sequences are asserted identical: downstream tooling correlates
/// the model-parameter and top-level-parameter blocks positionally.
struct UiOrder {
    next: usize,
    seq: Vec<usize>,
}
impl UiOrder {
    fn new() -> Self {
        Self {
            next: 2,
            seq: Vec::new(),
        }
    }
    /// Claim the next index.
    fn take(&mut self) -> usize {
        let index = self.next;
        self.next += 1;
        self.seq.push(index);
        index
    }
}

/// # Component Descriptor Generator
///
/// Borrows one read-only [ComponentConfig] for the duration of a generation call.
struct ComponentGen<'cfg> {
    cfg: &'cfg ComponentConfig,
}

impl<'cfg> ComponentGen<'cfg> {
    /// The component's full (lower-cased) name, keying filesets and metadata.
    fn full_name(&self) -> String {
        self.cfg.name.to_lowercase()
    }
    /// The versioned display name.
    fn display_name(&self) -> String {
        format!("{}_v1_0", self.full_name())
    }

    /// Assemble the complete `spirit:component` document.
    fn component(&self) -> Element {
        let cfg = self.cfg;
        let mut top = Element::new("spirit:component")
            .attr("xmlns:xilinx", XMLNS_XILINX)
            .attr("xmlns:spirit", XMLNS_SPIRIT)
            .attr("xmlns:xsi", XMLNS_XSI)
            .child(Element::text_elem("spirit:vendor", &cfg.vendor))
            .child(Element::text_elem("spirit:library", &cfg.library))
            .child(Element::text_elem("spirit:name", self.full_name()))
            .child(Element::text_elem("spirit:version", &cfg.version))
            .child(self.bus_interfaces());
        // addressSpaces and memoryMaps are omitted entirely when empty
        if let Some(spaces) = self.address_spaces() {
            top = top.child(spaces);
        }
        if let Some(maps) = self.memory_maps() {
            top = top.child(maps);
        }
        let mut model_order = UiOrder::new();
        let model = self.model(&mut model_order);
        let mut param_order = UiOrder::new();
        let parameters = self.parameters(&mut param_order);
        // Both passes are driven by the same traversal and field-list functions;
        // this guards future edits to either loop against silent desynchronization.
        debug_assert_eq!(model_order.seq, param_order.seq);
        top.child(model)
            .child(self.choices())
            .child(self.file_sets())
            .child(Element::text_elem("spirit:description", &cfg.description))
            .child(parameters)
            .child(self.vendor_extensions())
    }

    // ------------------------------------------------------------------
    // Bus interfaces
    // ------------------------------------------------------------------

    /// All bus interfaces: one data interface per endpoint, then the reset and
    /// clock sub-interfaces per endpoint, in the same traversal order.
    fn bus_interfaces(&self) -> Element {
        let mut bus = Element::new("spirit:busInterfaces");
        for (thread, role, ep) in self.cfg.endpoints() {
            bus = bus.child(self.bus_interface(thread, role, ep));
        }
        for (thread, _role, ep) in self.cfg.endpoints() {
            let qid = names::qualified_id(thread, ep);
            bus = bus
                .child(self.bus_interface_reset(&qid))
                .child(self.bus_interface_clock(&qid));
        }
        bus
    }
    /// The data bus-interface for one endpoint.
    fn bus_interface(&self, thread: &Thread, role: EndpointRole, ep: &Endpoint) -> Element {
        let qid = names::qualified_id(thread, ep);
        let bus_role = role.bus_role();
        let role_elem = match bus_role {
            BusRole::Master => Element::new("spirit:master").child(
                Element::new("spirit:addressSpaceRef").attr("spirit:addressSpaceRef", &qid),
            ),
            BusRole::Slave => Element::new("spirit:slave")
                .child(Element::new("spirit:memoryMapRef").attr("spirit:memoryMapRef", &qid)),
        };
        Element::new("spirit:busInterface")
            .child(name_elem(&qid))
            .child(bus_type("interface", "aximm"))
            .child(abstraction_type("interface", "aximm_rtl"))
            .child(role_elem)
            .child(self.port_maps(&qid, self.cfg.lite_applied(role)))
            .child(self.bus_parameters(&qid, ep.data_width, bus_role))
    }
    /// The port map binding each protocol signal to its physical port.
    fn port_maps(&self, qid: &str, lite: bool) -> Element {
        let mut maps = Element::new("spirit:portMaps");
        for sig in signal_list(lite) {
            maps = maps.child(port_map(qid, sig));
        }
        maps
    }
    /// Bus parameters: data width always, register count for masters only,
    /// narrow-burst-support flag always.
    fn bus_parameters(&self, qid: &str, data_width: usize, role: BusRole) -> Element {
        let mut params =
            Element::new("spirit:parameters").child(bus_param_data_width(qid, data_width));
        if role == BusRole::Master {
            params = params.child(bus_param_num_reg(qid, 4));
        }
        params.child(bus_param_narrow_burst(qid, 0))
    }
    /// The reset sub-interface paired with the `qid` data interface.
    fn bus_interface_reset(&self, qid: &str) -> Element {
        Element::new("spirit:busInterface")
            .child(name_elem(format!("{}_RST", qid)))
            .child(bus_type("signal", "reset"))
            .child(abstraction_type("signal", "reset_rtl"))
            .child(Element::new("spirit:slave"))
            .child(
                Element::new("spirit:portMaps").child(
                    Element::new("spirit:portMap")
                        .child(Element::new("spirit:logicalPort").child(name_elem("RST")))
                        .child(
                            Element::new("spirit:physicalPort")
                                .child(name_elem(names::reset_port(qid))),
                        ),
                ),
            )
            .child(
                Element::new("spirit:parameters").child(
                    Element::new("spirit:parameter")
                        .child(name_elem("POLARITY"))
                        .child(
                            Element::new("spirit:value")
                                .attr("spirit:id", names::busifparam_id(qid, "POLARITY"))
                                .text("ACTIVE_LOW"),
                        ),
                ),
            )
    }
    /// The clock sub-interface paired with the `qid` data interface.
    /// Its association parameters must reference the data interface's exact
    /// qualified identifier and its reset port.
    fn bus_interface_clock(&self, qid: &str) -> Element {
        Element::new("spirit:busInterface")
            .child(name_elem(format!("{}_CLK", qid)))
            .child(bus_type("signal", "clock"))
            .child(abstraction_type("signal", "clock_rtl"))
            .child(Element::new("spirit:slave"))
            .child(
                Element::new("spirit:portMaps").child(
                    Element::new("spirit:portMap")
                        .child(Element::new("spirit:logicalPort").child(name_elem("CLK")))
                        .child(
                            Element::new("spirit:physicalPort")
                                .child(name_elem(names::clock_port(qid))),
                        ),
                ),
            )
            .child(
                Element::new("spirit:parameters")
                    .child(
                        Element::new("spirit:parameter")
                            .child(name_elem("ASSOCIATED_BUSIF"))
                            .child(
                                Element::new("spirit:value")
                                    .attr(
                                        "spirit:id",
                                        names::busifparam_id(qid, "ASSOCIATED_BUSIF"),
                                    )
                                    .text(qid),
                            ),
                    )
                    .child(
                        Element::new("spirit:parameter")
                            .child(name_elem("ASSOCIATED_RESET"))
                            .child(
                                Element::new("spirit:value")
                                    .attr(
                                        "spirit:id",
                                        names::busifparam_id(qid, "ASSOCIATED_RESET"),
                                    )
                                    .text(names::reset_port(qid)),
                            ),
                    ),
            )
    }

    // ------------------------------------------------------------------
    // Address spaces & memory maps
    // ------------------------------------------------------------------

    /// One address space per master-role endpoint. `None` when there are none.
    fn address_spaces(&self) -> Option<Element> {
        let mut spaces = Element::new("spirit:addressSpaces");
        let mut empty = true;
        for (thread, role, ep) in self.cfg.endpoints() {
            if role.bus_role() != BusRole::Master {
                continue;
            }
            spaces = spaces.child(self.address_space(&names::qualified_id(thread, ep)));
            empty = false;
        }
        if empty {
            None
        } else {
            Some(spaces)
        }
    }
    /// An address space whose range and width resolve against the endpoint's
    /// ADDR_WIDTH/DATA_WIDTH model parameters, by textual formula.
    fn address_space(&self, qid: &str) -> Element {
        Element::new("spirit:addressSpace")
            .child(name_elem(qid))
            .child(
                Element::new("spirit:range")
                    .attr("spirit:format", "long")
                    .attr("spirit:resolve", "dependent")
                    .attr("spirit:dependency", names::space_range_dependency(qid))
                    .attr("spirit:minimum", 0)
                    .attr("spirit:maximum", 4294967296u64)
                    .text(4294967296u64),
            )
            .child(
                Element::new("spirit:width")
                    .attr("spirit:format", "long")
                    .attr("spirit:resolve", "dependent")
                    .attr("spirit:dependency", names::space_width_dependency(qid))
                    .text(self.cfg.addr_width),
            )
    }
    /// One memory map per slave-role endpoint. `None` when there are none.
    fn memory_maps(&self) -> Option<Element> {
        let mut maps = Element::new("spirit:memoryMaps");
        let mut empty = true;
        for (thread, role, ep) in self.cfg.endpoints() {
            if role.bus_role() != BusRole::Slave {
                continue;
            }
            maps = maps.child(self.memory_map(&names::qualified_id(thread, ep), ep.data_width));
            empty = false;
        }
        if empty {
            None
        } else {
            Some(maps)
        }
    }
    /// A register-usage memory map: single address block at base 0, range 4096,
    /// width = endpoint data width, with base/high address indirection parameters.
    fn memory_map(&self, qid: &str, data_width: usize) -> Element {
        Element::new("spirit:memoryMap").child(name_elem(qid)).child(
            Element::new("spirit:addressBlock")
                .child(name_elem(format!("{}_reg", qid)))
                .child(
                    Element::new("spirit:baseAddress")
                        .attr("spirit:format", "long")
                        .attr("spirit:resolve", "user")
                        .text(0),
                )
                .child(
                    Element::new("spirit:range")
                        .attr("spirit:format", "long")
                        .text(4096),
                )
                .child(
                    Element::new("spirit:width")
                        .attr("spirit:format", "long")
                        .text(data_width),
                )
                .child(Element::text_elem("spirit:usage", "register"))
                .child(
                    Element::new("spirit:parameters")
                        .child(addr_block_param(
                            qid,
                            "OFFSET_BASE_PARAM",
                            names::base_addr_symbol(qid),
                        ))
                        .child(addr_block_param(
                            qid,
                            "OFFSET_HIGH_PARAM",
                            names::high_addr_symbol(qid),
                        )),
                ),
        )
    }

    // ------------------------------------------------------------------
    // Model: views, ports, model parameters
    // ------------------------------------------------------------------

    fn model(&self, order: &mut UiOrder) -> Element {
        Element::new("spirit:model")
            .child(self.views())
            .child(self.ports())
            .child(self.model_parameters(order))
    }
    /// The five static view descriptors.
    fn views(&self) -> Element {
        let model_name = self.full_name();
        Element::new("spirit:views")
            .child(view(
                "xilinx_verilogsynthesis",
                "Verilog Synthesis",
                "verilogSource:vivado.xilinx.com:synthesis",
                Some("verilog"),
                Some(&model_name),
                "xilinx_verilogsynthesis_view_fileset",
            ))
            .child(view(
                "xilinx_verilogbehavioralsimulation",
                "Verilog Simulation",
                "verilogSource:vivado.xilinx.com:simulation",
                Some("verilog"),
                Some(&model_name),
                "xilinx_verilogbehavioralsimulation_view_fileset",
            ))
            .child(view(
                "xilinx_synthesisconstraints",
                "Synthesis Constraints",
                ":vivado.xilinx.com:synthesis.constraints",
                None,
                None,
                "xilinx_synthesisconstraints_view_fileset",
            ))
            .child(view(
                "xilinx_xpgui",
                "UI Layout",
                ":vivado.xilinx.com:xgui.ui",
                None,
                None,
                "xilinx_xpgui_view_fileset",
            ))
            .child(view(
                "bd_tcl",
                "Block Diagram",
                ":vivado.xilinx.com:block.diagram",
                None,
                None,
                "bd_tcl_view_fileset",
            ))
    }
    /// The physical port list: component clock/reset, per-thread clock/reset,
    /// each endpoint's protocol signals, then any caller-supplied extras.
    fn ports(&self) -> Element {
        let mut ports = Element::new("spirit:ports")
            .child(scalar_port("UCLK", PortDirection::In))
            .child(scalar_port("URESETN", PortDirection::In));
        for thread in self.cfg.threads.iter() {
            ports = ports
                .child(scalar_port(
                    &format!("{}_CCLK", thread.name),
                    PortDirection::In,
                ))
                .child(scalar_port(
                    &format!("{}_CRESETN", thread.name),
                    PortDirection::In,
                ));
            for (role, ep) in thread.endpoints() {
                ports = ports.kids(self.endpoint_ports(thread, role, ep));
            }
        }
        for extra in self.cfg.extra_ports.iter() {
            let vector = match extra.msb {
                Some(msb) => PortVector::Immediate(msb),
                None => PortVector::Scalar,
            };
            ports = ports.child(port_entry(&extra.name, extra.direction, vector, false));
        }
        ports
    }
    /// The protocol port group for one endpoint, followed by its clock and reset.
    /// Transaction-ID and sideband-user ports carry a default-value driver:
    /// they may be left undriven when their width parameter is clamped to zero.
    fn endpoint_ports(&self, thread: &Thread, role: EndpointRole, ep: &Endpoint) -> Vec<Element> {
        let qid = names::qualified_id(thread, ep);
        let bus_role = role.bus_role();
        let mut ret = Vec::new();
        for sig in signal_list(self.cfg.lite_applied(role)) {
            let driver = matches!(sig.shape(), SignalShape::Id | SignalShape::User(_));
            ret.push(port_entry(
                &names::port_name(&qid, sig),
                sig.direction(bus_role),
                self.port_vector(&qid, ep, sig),
                driver,
            ));
        }
        ret.push(scalar_port(&names::clock_port(&qid), PortDirection::In));
        ret.push(scalar_port(&names::reset_port(&qid), PortDirection::In));
        ret
    }
    /// The bit-range of one signal's port: fixed literal, or a dependent vector
    /// whose left bound references a width model-parameter. Right bound is 0.
    fn port_vector(&self, qid: &str, ep: &Endpoint, sig: AxiSignal) -> PortVector {
        match sig.shape() {
            SignalShape::Scalar => PortVector::Scalar,
            SignalShape::Fixed(msb) => PortVector::Immediate(msb),
            SignalShape::Id => PortVector::Dependent {
                formula: names::vector_msb(qid, WidthField::ThreadId),
                msb: 0,
            },
            SignalShape::Addr => PortVector::Dependent {
                formula: names::vector_msb(qid, WidthField::Addr),
                msb: self.cfg.addr_width - 1,
            },
            SignalShape::Data => PortVector::Dependent {
                formula: names::vector_msb(qid, WidthField::Data),
                msb: ep.data_width - 1,
            },
            SignalShape::Strobe => PortVector::Dependent {
                formula: names::strobe_msb(qid),
                msb: ep.data_width - 1,
            },
            SignalShape::User(field) => PortVector::Dependent {
                formula: names::vector_msb(qid, field),
                msb: 0,
            },
        }
    }
    /// Model parameters for every endpoint, in traversal order, then extras.
    fn model_parameters(&self, order: &mut UiOrder) -> Element {
        let mut params = Element::new("spirit:modelParameters");
        for (thread, role, ep) in self.cfg.endpoints() {
            let qid = names::qualified_id(thread, ep);
            for field in width_fields(self.cfg.lite_applied(role)) {
                params = params.child(self.model_parameter(&qid, ep, *field, order.take()));
            }
        }
        for extra in self.cfg.extra_params.iter() {
            params = params.child(extra_param(extra, true));
        }
        params
    }
    /// One declared width model-parameter. Generated widths carry literal
    /// values; dependent ones clamp the paired top-level parameter to a
    /// minimum of one bit.
    fn model_parameter(&self, qid: &str, ep: &Endpoint, field: WidthField, order: usize) -> Element {
        let name = names::width_param(qid, field);
        let mut value = Element::new("spirit:value").attr("spirit:format", "long");
        let literal: usize;
        match field {
            WidthField::ThreadId => {
                value = value
                    .attr("spirit:resolve", "dependent")
                    .attr("spirit:id", names::modelparam_id(&name))
                    .attr("spirit:dependency", names::clamp_min_one(qid, field))
                    .attr("spirit:order", order)
                    .attr("spirit:minimum", 0)
                    .attr("spirit:maximum", 32)
                    .attr("spirit:rangeType", "long");
                literal = 1;
            }
            WidthField::Addr => {
                value = value
                    .attr("spirit:resolve", "generated")
                    .attr("spirit:id", names::modelparam_id(&name))
                    .attr("spirit:order", order)
                    .attr("spirit:rangeType", "long");
                literal = self.cfg.addr_width;
            }
            WidthField::Data => {
                value = value
                    .attr("spirit:resolve", "generated")
                    .attr("spirit:id", names::modelparam_id(&name))
                    .attr("spirit:order", order)
                    .attr("spirit:rangeType", "long");
                literal = ep.data_width;
            }
            // Sideband-user widths
            _ => {
                value = value
                    .attr("spirit:resolve", "dependent")
                    .attr("spirit:id", names::modelparam_id(&name))
                    .attr("spirit:dependency", names::clamp_min_one(qid, field))
                    .attr("spirit:order", order)
                    .attr("spirit:minimum", 0)
                    .attr("spirit:maximum", 1024)
                    .attr("spirit:rangeType", "long");
                literal = 1;
            }
        }
        Element::new("spirit:modelParameter")
            .attr("spirit:dataType", "integer")
            .child(name_elem(&name))
            .child(Element::text_elem("spirit:displayName", &name))
            .child(Element::text_elem("spirit:description", &name))
            .child(value.text(literal))
    }

    // ------------------------------------------------------------------
    // Choices, filesets, top-level parameters, vendor extensions
    // ------------------------------------------------------------------

    /// The six static choice enumerations.
    fn choices(&self) -> Element {
        Element::new("spirit:choices")
            .child(choice("choices_0", &WIDTH_CHOICES))
            .child(bool_choice("choices_1"))
            .child(choice("choices_2", &WIDTH_CHOICES))
            .child(bool_choice("choices_3"))
            .child(choice("choices_4", &POW2_CHOICES))
            .child(choice("choices_5", &POW2_CHOICES))
    }
    /// The five packaging filesets, keyed by the lower-cased component name.
    fn file_sets(&self) -> Element {
        let n = self.full_name();
        Element::new("spirit:fileSets")
            .child(
                Element::new("spirit:fileSet")
                    .child(name_elem("xilinx_verilogsynthesis_view_fileset"))
                    .child(file(
                        &format!("hdl/verilog/{}.v", n),
                        Some("verilogSource"),
                        &[],
                    )),
            )
            .child(
                Element::new("spirit:fileSet")
                    .child(name_elem("xilinx_verilogbehavioralsimulation_view_fileset"))
                    .child(file(
                        &format!("hdl/verilog/{}.v", n),
                        Some("verilogSource"),
                        &[],
                    ))
                    .child(file(
                        &format!("test/test_{}.v", n),
                        Some("verilogSource"),
                        &[],
                    )),
            )
            .child(
                Element::new("spirit:fileSet")
                    .child(name_elem("xilinx_xpgui_view_fileset"))
                    .child(file("xgui/xgui.tcl", Some("tclSource"), &["XGUI_VERSION_2"])),
            )
            .child(
                Element::new("spirit:fileSet")
                    .child(name_elem("bd_tcl_view_fileset"))
                    .child(file("bd/bd.tcl", Some("tclSource"), &[])),
            )
            .child(
                Element::new("spirit:fileSet")
                    .child(name_elem("xilinx_synthesisconstraints_view_fileset"))
                    .child(file(&format!("data/{}.xdc", n), None, &["xdc"])),
            )
    }
    /// Top-level (integrator-tunable) parameters. Mirrors the model-parameter
    /// traversal and field order exactly, sharing its counter discipline.
    fn parameters(&self, order: &mut UiOrder) -> Element {
        let mut params = Element::new("spirit:parameters").child(
            Element::new("spirit:parameter")
                .child(name_elem("Component_Name"))
                .child(
                    Element::new("spirit:value")
                        .attr("spirit:resolve", "user")
                        .attr("spirit:id", names::param_id("Component_Name"))
                        .attr("spirit:order", 1)
                        .text(self.display_name()),
                ),
        );
        for (thread, role, ep) in self.cfg.endpoints() {
            let qid = names::qualified_id(thread, ep);
            for field in width_fields(self.cfg.lite_applied(role)) {
                params = params.child(self.parameter(&qid, ep, *field, order.take()));
            }
        }
        for extra in self.cfg.extra_params.iter() {
            params = params.child(extra_param(extra, false));
        }
        params
    }
    /// One user-resolvable width parameter. Address/data widths additionally
    /// carry the hidden-from-UI marker.
    fn parameter(&self, qid: &str, ep: &Endpoint, field: WidthField, order: usize) -> Element {
        let name = names::width_param(qid, field);
        let mut value = Element::new("spirit:value").attr("spirit:format", "long");
        let mut hidden = false;
        let literal: usize;
        match field {
            WidthField::ThreadId => {
                value = value
                    .attr("spirit:resolve", "user")
                    .attr("spirit:id", names::param_id(&name))
                    .attr("spirit:dependency", names::clamp_min_one(qid, field))
                    .attr("spirit:order", order)
                    .attr("spirit:minimum", 0)
                    .attr("spirit:maximum", 32)
                    .attr("spirit:rangeType", "long");
                literal = 1;
            }
            WidthField::Addr => {
                value = value
                    .attr("spirit:resolve", "user")
                    .attr("spirit:id", names::param_id(&name))
                    .attr("spirit:order", order)
                    .attr("spirit:rangeType", "long");
                literal = self.cfg.addr_width;
                hidden = true;
            }
            WidthField::Data => {
                value = value
                    .attr("spirit:resolve", "user")
                    .attr("spirit:id", names::param_id(&name))
                    .attr("spirit:order", order)
                    .attr("spirit:rangeType", "long");
                literal = ep.data_width;
                hidden = true;
            }
            // Sideband-user widths
            _ => {
                value = value
                    .attr("spirit:resolve", "dependent")
                    .attr("spirit:id", names::param_id(&name))
                    .attr("spirit:dependency", names::clamp_min_one(qid, field))
                    .attr("spirit:order", order)
                    .attr("spirit:minimum", 0)
                    .attr("spirit:maximum", 1024)
                    .attr("spirit:rangeType", "long");
                literal = 0;
            }
        }
        let mut param = Element::new("spirit:parameter")
            .child(name_elem(&name))
            .child(Element::text_elem("spirit:displayName", &name))
            .child(Element::text_elem("spirit:description", &name))
            .child(value.text(literal));
        if hidden {
            param = param.child(hidden_marker());
        }
        param
    }
    /// The static vendor-extension block.
    fn vendor_extensions(&self) -> Element {
        Element::new("spirit:vendorExtensions")
            .child(
                Element::new("xilinx:coreExtensions")
                    .child(
                        Element::new("xilinx:supportedFamilies").child(
                            Element::new("xilinx:family")
                                .attr("xilinx:lifeCycle", "Production")
                                .text(SUPPORTED_FAMILY),
                        ),
                    )
                    .child(
                        Element::new("xilinx:taxonomies")
                            .child(Element::text_elem("xilinx:taxonomy", TAXONOMY)),
                    )
                    .child(Element::text_elem("xilinx:displayName", self.display_name())),
            )
            .child(
                Element::new("xilinx:packagingInfo")
                    .child(Element::text_elem("xilinx:xilinxVersion", PACKAGING_VERSION)),
            )
    }
}

/// Bit-range alternatives for a physical port.
enum PortVector {
    /// Single-bit wire, no vector
    Scalar,
    /// Literal `[msb:0]` vector
    Immediate(usize),
    /// Parameter-dependent left bound with a literal fallback value
    Dependent { formula: String, msb: usize },
}

// ----------------------------------------------------------------------
// Static element helpers
// ----------------------------------------------------------------------

/// A `spirit:name` text element.
fn name_elem(v: impl ToString) -> Element {
    Element::text_elem("spirit:name", v)
}
/// A `spirit:busType` identity element.
fn bus_type(library: &str, name: &str) -> Element {
    Element::new("spirit:busType")
        .attr("spirit:vendor", "xilinx.com")
        .attr("spirit:library", library)
        .attr("spirit:name", name)
        .attr("spirit:version", "1.0")
}
/// A `spirit:abstractionType` identity element.
fn abstraction_type(library: &str, name: &str) -> Element {
    Element::new("spirit:abstractionType")
        .attr("spirit:vendor", "xilinx.com")
        .attr("spirit:library", library)
        .attr("spirit:name", name)
        .attr("spirit:version", "1.0")
}
/// One logical-to-physical port-map entry.
fn port_map(qid: &str, sig: AxiSignal) -> Element {
    Element::new("spirit:portMap")
        .child(Element::new("spirit:logicalPort").child(name_elem(sig)))
        .child(Element::new("spirit:physicalPort").child(name_elem(names::port_name(qid, sig))))
}
/// The `WIZ.DATA_WIDTH` bus parameter.
fn bus_param_data_width(qid: &str, data_width: usize) -> Element {
    Element::new("spirit:parameter")
        .child(name_elem("WIZ.DATA_WIDTH"))
        .child(
            Element::new("spirit:value")
                .attr("spirit:format", "long")
                .attr("spirit:id", names::busifparam_id(qid, "WIZ.DATA_WIDTH"))
                .attr("spirit:choiceRef", "choices_0")
                .text(data_width),
        )
}
/// The `WIZ.NUM_REG` bus parameter, masters only.
fn bus_param_num_reg(qid: &str, num_reg: usize) -> Element {
    Element::new("spirit:parameter")
        .child(name_elem("WIZ.NUM_REG"))
        .child(
            Element::new("spirit:value")
                .attr("spirit:format", "long")
                .attr("spirit:id", names::busifparam_id(qid, "WIZ.NUM_REG"))
                .attr("spirit:minimum", 4)
                .attr("spirit:maximum", 512)
                .attr("spirit:rangeType", "long")
                .text(num_reg),
        )
}
/// The `SUPPORTS_NARROW_BURST` bus parameter.
fn bus_param_narrow_burst(qid: &str, flag: usize) -> Element {
    Element::new("spirit:parameter")
        .child(name_elem("SUPPORTS_NARROW_BURST"))
        .child(
            Element::new("spirit:value")
                .attr("spirit:format", "long")
                .attr(
                    "spirit:id",
                    names::busifparam_id(qid, "SUPPORTS_NARROW_BURST"),
                )
                .attr("spirit:choiceRef", "choices_1")
                .text(flag),
        )
}
/// One base/high address indirection parameter of a slave address block.
fn addr_block_param(qid: &str, param: &str, symbol: String) -> Element {
    Element::new("spirit:parameter").child(name_elem(param)).child(
        Element::new("spirit:value")
            .attr("spirit:id", names::addr_block_id(qid, param))
            .attr("spirit:dependency", names::addr_block_dependency(qid, param))
            .text(symbol),
    )
}
/// One view descriptor.
fn view(
    name: &str,
    display_name: &str,
    env_identifier: &str,
    language: Option<&str>,
    model_name: Option<&str>,
    fileset: &str,
) -> Element {
    let mut view = Element::new("spirit:view")
        .child(name_elem(name))
        .child(Element::text_elem("spirit:displayName", display_name))
        .child(Element::text_elem("spirit:envIdentifier", env_identifier));
    if let Some(language) = language {
        view = view.child(Element::text_elem("spirit:language", language));
    }
    if let Some(model_name) = model_name {
        view = view.child(Element::text_elem("spirit:modelName", model_name));
    }
    view.child(Element::new("spirit:fileSetRef").child(Element::text_elem(
        "spirit:localName",
        fileset,
    )))
}
/// One physical port entry. `driver` appends the zero default-value driver
/// block after the wire type definitions.
fn port_entry(name: &str, direction: PortDirection, vector: PortVector, driver: bool) -> Element {
    let mut wire =
        Element::new("spirit:wire").child(Element::text_elem("spirit:direction", direction));
    wire = match vector {
        PortVector::Scalar => wire,
        PortVector::Immediate(msb) => wire.child(vector_elem(None, msb)),
        PortVector::Dependent { formula, msb } => wire.child(vector_elem(Some(formula), msb)),
    };
    wire = wire.child(wire_type_defs());
    if driver {
        wire = wire.child(
            Element::new("spirit:driver").child(Element::text_elem("spirit:defaultValue", 0)),
        );
    }
    Element::new("spirit:port")
        .child(name_elem(name))
        .child(wire)
}
/// A single-bit port entry.
fn scalar_port(name: &str, direction: PortDirection) -> Element {
    port_entry(name, direction, PortVector::Scalar, false)
}
/// A port bit-range vector. The right bound is always an immediate 0.
fn vector_elem(formula: Option<String>, msb: usize) -> Element {
    let mut left = Element::new("spirit:left").attr("spirit:format", "long");
    left = match formula {
        Some(formula) => left
            .attr("spirit:resolve", "dependent")
            .attr("spirit:dependency", formula),
        None => left.attr("spirit:resolve", "immediate"),
    };
    let right = Element::new("spirit:right")
        .attr("spirit:format", "long")
        .attr("spirit:resolve", "immediate")
        .text(0);
    Element::new("spirit:vector").child(left.text(msb)).child(right)
}
/// The wire type-definition block shared by every port.
fn wire_type_defs() -> Element {
    Element::new("spirit:wireTypeDefs").child(
        Element::new("spirit:wireTypeDef")
            .child(Element::text_elem("spirit:typeName", "wire"))
            .child(Element::text_elem(
                "spirit:viewNameRef",
                "xilinx_verilogsynthesis",
            ))
            .child(Element::text_elem(
                "spirit:viewNameRef",
                "xilinx_verilogbehavioralsimulation",
            )),
    )
}
/// One numeric choice enumeration.
fn choice(name: &str, values: &[usize]) -> Element {
    let mut choice = Element::new("spirit:choice").child(name_elem(name));
    for v in values {
        choice = choice.child(Element::text_elem("spirit:enumeration", v));
    }
    choice
}
/// One boolean choice enumeration, values 1/0.
fn bool_choice(name: &str) -> Element {
    Element::new("spirit:choice")
        .child(name_elem(name))
        .child(
            Element::new("spirit:enumeration")
                .attr("spirit:text", "true")
                .text(1),
        )
        .child(
            Element::new("spirit:enumeration")
                .attr("spirit:text", "false")
                .text(0),
        )
}
/// One packaging file entry.
fn file(name: &str, file_type: Option<&str>, user_types: &[&str]) -> Element {
    let mut file = Element::new("spirit:file").child(name_elem(name));
    if let Some(tp) = file_type {
        file = file.child(Element::text_elem("spirit:fileType", tp));
    }
    for u in user_types {
        file = file.child(Element::text_elem("spirit:userFileType", u));
    }
    file
}
/// A caller-supplied extra parameter, in model (`generated`) or top-level
/// (`user`) form. Extras bypass the ordering counter.
fn extra_param(extra: &ExtraParam, model: bool) -> Element {
    let tag = if model {
        "spirit:modelParameter"
    } else {
        "spirit:parameter"
    };
    let mut value = Element::new("spirit:value");
    if extra.tp == ParamType::Integer {
        value = value.attr("spirit:format", "long");
    }
    value = if model {
        value
            .attr("spirit:resolve", "generated")
            .attr("spirit:id", names::modelparam_id(&extra.name))
    } else {
        value
            .attr("spirit:resolve", "user")
            .attr("spirit:id", names::param_id(&extra.name))
    };
    Element::new(tag)
        .child(name_elem(&extra.name))
        .child(Element::text_elem("spirit:displayName", &extra.name))
        .child(Element::text_elem("spirit:description", &extra.name))
        .child(value.text(&extra.value))
}
/// The hidden-from-UI vendor-extension marker on generated width parameters.
fn hidden_marker() -> Element {
    Element::new("spirit:vendorExtensions").child(
        Element::new("xilinx:parameterInfo").child(
            Element::new("xilinx:enablement")
                .child(Element::text_elem("xilinx:isEnabled", "false")),
        ),
    )
}
