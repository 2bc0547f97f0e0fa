//!
//! # Spirit21 Unit Tests
//!

use super::*;
use crate::names;
use crate::utils::SerializationFormat::Json;

/// Grab the `spirit:name` text of element `e`. Panics (fails the test) if absent.
fn name_of(e: &Element) -> &str {
    e.first("spirit:name")
        .and_then(|n| n.text_content())
        .unwrap()
}
/// Collect all descendant elements of `e` named `name`, depth-first.
fn descendants<'e>(e: &'e Element, name: &str, out: &mut Vec<&'e Element>) {
    for child in e.elems() {
        if child.name == name {
            out.push(child);
        }
        descendants(child, name, out);
    }
}
/// A single-thread configuration holding one master-role memory endpoint.
fn memory_config() -> ComponentConfig {
    let mut thread = Thread::new("t0");
    thread.memories.push(Endpoint::new("mem0", 32));
    let mut cfg = ComponentConfig::new("UserLogic");
    cfg.threads.push(thread);
    cfg
}
/// A single-thread configuration holding one slave-role register endpoint.
fn register_config(lite: bool) -> ComponentConfig {
    let mut thread = Thread::new("t0");
    thread.ioregisters.push(Endpoint::new("reg0", 32));
    let mut cfg = ComponentConfig::new("UserLogic");
    cfg.threads.push(thread);
    cfg.lite = lite;
    cfg
}

#[test]
fn test_lite_signal_partition() -> SpiritResult<()> {
    // Full list passes through untouched
    assert_eq!(signal_list(false), FULL_SIGNALS.to_vec());
    // Lite filtering is pure set-membership: result equals the static subset
    assert_eq!(signal_list(true), LITE_SIGNALS.to_vec());
    // And the removed complement partitions the full list
    assert_eq!(LITE_REMOVED.len() + LITE_SIGNALS.len(), FULL_SIGNALS.len());
    assert_eq!(LITE_REMOVED.len(), 23);
    for sig in LITE_REMOVED.iter() {
        assert!(!LITE_SIGNALS.contains(sig));
        assert!(FULL_SIGNALS.contains(sig));
    }
    // Lite keeps the full list's relative order
    let positions: Vec<usize> = LITE_SIGNALS
        .iter()
        .map(|s| FULL_SIGNALS.iter().position(|f| f == s).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    Ok(())
}

#[test]
fn test_signal_directions() -> SpiritResult<()> {
    use AxiSignal::*;
    // Masters drive the address channels and receive the responses
    assert_eq!(AwAddr.direction(BusRole::Master), PortDirection::Out);
    assert_eq!(AwAddr.direction(BusRole::Slave), PortDirection::In);
    assert_eq!(RData.direction(BusRole::Master), PortDirection::In);
    assert_eq!(RData.direction(BusRole::Slave), PortDirection::Out);
    assert_eq!(WReady.direction(BusRole::Master), PortDirection::In);
    assert_eq!(BValid.direction(BusRole::Slave), PortDirection::Out);
    // Every signal flips cleanly between the two roles
    for sig in FULL_SIGNALS.iter() {
        assert_eq!(
            sig.direction(BusRole::Master).flipped(),
            sig.direction(BusRole::Slave)
        );
    }
    Ok(())
}

#[test]
fn test_dependency_formulas() -> SpiritResult<()> {
    assert_eq!(
        names::vector_msb("t0_mem0_AXI", WidthField::Data),
        "(spirit:decode(id('MODELPARAM_VALUE.C_t0_mem0_AXI_DATA_WIDTH'))-1)"
    );
    assert_eq!(
        names::strobe_msb("t0_mem0_AXI"),
        "(spirit:decode(id('MODELPARAM_VALUE.C_t0_mem0_AXI_DATA_WIDTH'))/8-1)"
    );
    assert_eq!(
        names::clamp_min_one("t0_mem0_AXI", WidthField::ThreadId),
        "((spirit:decode(id('PARAM_VALUE.C_t0_mem0_AXI_THREAD_ID_WIDTH')) <= 0 ) + (spirit:decode(id('PARAM_VALUE.C_t0_mem0_AXI_THREAD_ID_WIDTH'))))"
    );
    assert_eq!(
        names::space_range_dependency("t0_mem0_AXI"),
        "pow(2,(spirit:decode(id('MODELPARAM_VALUE.C_t0_mem0_AXI_ADDR_WIDTH')) - 1) + 1)"
    );
    assert_eq!(
        names::addr_block_id("t0_reg0_AXI", "OFFSET_BASE_PARAM"),
        "ADDRBLOCKPARAM_VALUE.t0_reg0_AXI_REG.OFFSET_BASE_PARAM"
    );
    assert_eq!(
        names::addr_block_dependency("t0_reg0_AXI", "OFFSET_BASE_PARAM"),
        "ADDRBLOCKPARAM_VALUE.t0_reg0_AXI_reg.OFFSET_BASE_PARAM"
    );
    Ok(())
}

#[test]
fn test_master_memory_component() -> SpiritResult<()> {
    let top = generate_tree(&memory_config())?;
    assert_eq!(top.name, "spirit:component");
    // Lower-cased component name
    assert_eq!(
        top.first("spirit:name").unwrap().text_content(),
        Some("userlogic")
    );

    // One data interface plus its reset and clock sub-interfaces
    let bus = top.first("spirit:busInterfaces").unwrap();
    let ifaces: Vec<&Element> = bus.all("spirit:busInterface").collect();
    assert_eq!(ifaces.len(), 3);
    assert_eq!(name_of(ifaces[0]), "t0_mem0_AXI");
    assert_eq!(name_of(ifaces[1]), "t0_mem0_AXI_RST");
    assert_eq!(name_of(ifaces[2]), "t0_mem0_AXI_CLK");

    // Master polarity, referencing the like-named address space
    let master = ifaces[0].first("spirit:master").unwrap();
    let space_ref = master.first("spirit:addressSpaceRef").unwrap();
    assert_eq!(
        space_ref.attr_value("spirit:addressSpaceRef"),
        Some("t0_mem0_AXI")
    );
    assert!(ifaces[0].first("spirit:slave").is_none());

    // Full-protocol port map, one entry per signal
    let maps = ifaces[0].first("spirit:portMaps").unwrap();
    assert_eq!(maps.all("spirit:portMap").count(), 42);

    // Masters carry the register-count wizard parameter
    let mut params = Vec::new();
    descendants(ifaces[0], "spirit:parameter", &mut params);
    assert!(params.iter().any(|p| name_of(p) == "WIZ.NUM_REG"));

    // Address space present, memory maps absent
    let spaces = top.first("spirit:addressSpaces").unwrap();
    assert_eq!(name_of(spaces.first("spirit:addressSpace").unwrap()), "t0_mem0_AXI");
    assert!(top.first("spirit:memoryMaps").is_none());

    // The thread-ID width parameter survives in both parameter blocks
    let xml = generate(&memory_config())?;
    assert!(xml.contains("MODELPARAM_VALUE.C_t0_mem0_AXI_THREAD_ID_WIDTH"));
    assert!(xml.contains("PARAM_VALUE.C_t0_mem0_AXI_THREAD_ID_WIDTH"));
    Ok(())
}

#[test]
fn test_lite_register_component() -> SpiritResult<()> {
    let top = generate_tree(&register_config(true))?;

    let bus = top.first("spirit:busInterfaces").unwrap();
    let iface = bus.first("spirit:busInterface").unwrap();
    assert_eq!(name_of(iface), "t0_reg0_AXI");

    // Slave polarity, referencing the like-named memory map
    let slave = iface.first("spirit:slave").unwrap();
    let map_ref = slave.first("spirit:memoryMapRef").unwrap();
    assert_eq!(map_ref.attr_value("spirit:memoryMapRef"), Some("t0_reg0_AXI"));

    // Reduced port map
    let maps = iface.first("spirit:portMaps").unwrap();
    assert_eq!(maps.all("spirit:portMap").count(), 19);

    // Slaves skip the register-count wizard parameter
    let mut params = Vec::new();
    descendants(iface, "spirit:parameter", &mut params);
    assert!(params.iter().all(|p| name_of(p) != "WIZ.NUM_REG"));

    // Register-usage memory map at base 0, range 4096, endpoint data width
    assert!(top.first("spirit:addressSpaces").is_none());
    let map = top
        .first("spirit:memoryMaps")
        .unwrap()
        .first("spirit:memoryMap")
        .unwrap();
    assert_eq!(name_of(map), "t0_reg0_AXI");
    let block = map.first("spirit:addressBlock").unwrap();
    assert_eq!(name_of(block), "t0_reg0_AXI_reg");
    assert_eq!(
        block.first("spirit:baseAddress").unwrap().text_content(),
        Some("0")
    );
    assert_eq!(block.first("spirit:range").unwrap().text_content(), Some("4096"));
    assert_eq!(block.first("spirit:width").unwrap().text_content(), Some("32"));
    assert_eq!(
        block.first("spirit:usage").unwrap().text_content(),
        Some("register")
    );

    // Lite suppresses the non-lite width parameters entirely
    let xml = generate(&register_config(true))?;
    assert!(!xml.contains("THREAD_ID_WIDTH"));
    assert!(!xml.contains("AWUSER_WIDTH"));
    assert!(xml.contains("PARAM_VALUE.C_t0_reg0_AXI_ADDR_WIDTH"));
    assert!(xml.contains("PARAM_VALUE.C_t0_reg0_AXI_DATA_WIDTH"));
    Ok(())
}

#[test]
fn test_lite_spares_masters() -> SpiritResult<()> {
    // The lite policy reduces slave-role interfaces only
    let mut thread = Thread::new("t0");
    thread.memories.push(Endpoint::new("mem0", 32));
    thread.ioregisters.push(Endpoint::new("reg0", 32));
    let mut cfg = ComponentConfig::new("Mixed");
    cfg.threads.push(thread);
    cfg.lite = true;

    let top = generate_tree(&cfg)?;
    let bus = top.first("spirit:busInterfaces").unwrap();
    let ifaces: Vec<&Element> = bus.all("spirit:busInterface").collect();
    // Two data interfaces, then reset/clock pairs per endpoint
    assert_eq!(ifaces.len(), 6);
    let count = |i: usize| {
        ifaces[i]
            .first("spirit:portMaps")
            .unwrap()
            .all("spirit:portMap")
            .count()
    };
    assert_eq!(count(0), 42); // t0_mem0_AXI, untouched
    assert_eq!(count(1), 19); // t0_reg0_AXI, reduced
    Ok(())
}

#[test]
fn test_section_counts_follow_roles() -> SpiritResult<()> {
    let mut t0 = Thread::new("t0");
    t0.memories.push(Endpoint::new("mem0", 32));
    t0.instreams.push(Endpoint::new("in0", 64));
    t0.iochannels.push(Endpoint::new("ch0", 32));
    let mut t1 = Thread::new("t1");
    t1.outstreams.push(Endpoint::new("out0", 128));
    t1.ioregisters.push(Endpoint::new("reg0", 32));
    let mut cfg = ComponentConfig::new("Multi");
    cfg.threads = vec![t0, t1];

    let top = generate_tree(&cfg)?;
    // 5 endpoints, 3 interfaces each
    let bus = top.first("spirit:busInterfaces").unwrap();
    assert_eq!(bus.all("spirit:busInterface").count(), 15);
    // 3 masters, 2 slaves
    let spaces = top.first("spirit:addressSpaces").unwrap();
    assert_eq!(spaces.all("spirit:addressSpace").count(), 3);
    let maps = top.first("spirit:memoryMaps").unwrap();
    assert_eq!(maps.all("spirit:memoryMap").count(), 2);

    // Thread traversal order holds: t0's endpoints before t1's,
    // role-ordered within each thread
    let names: Vec<&str> = bus
        .all("spirit:busInterface")
        .take(5)
        .map(name_of)
        .collect();
    assert_eq!(
        names,
        vec![
            "t0_mem0_AXI",
            "t0_in0_AXI",
            "t0_ch0_AXI",
            "t1_out0_AXI",
            "t1_reg0_AXI"
        ]
    );
    Ok(())
}

#[test]
fn test_cross_section_consistency() -> SpiritResult<()> {
    // Every endpoint's qualified identifier appears unchanged in the
    // bus-interface, port, model-parameter, and address-space or memory-map
    // sections, for all threads and all roles
    let mut t0 = Thread::new("t0");
    t0.memories.push(Endpoint::new("mem0", 32));
    t0.instreams.push(Endpoint::new("in0", 64));
    t0.outstreams.push(Endpoint::new("out0", 64));
    t0.iochannels.push(Endpoint::new("ch0", 32));
    t0.ioregisters.push(Endpoint::new("reg0", 32));
    let mut cfg = ComponentConfig::new("Everything");
    cfg.threads.push(t0);

    let top = generate_tree(&cfg)?;
    let bus = top.first("spirit:busInterfaces").unwrap();
    let ports = top
        .first("spirit:model")
        .unwrap()
        .first("spirit:ports")
        .unwrap();
    let model_params = top
        .first("spirit:model")
        .unwrap()
        .first("spirit:modelParameters")
        .unwrap();

    for (thread, role, ep) in cfg.endpoints() {
        let qid = names::qualified_id(thread, ep);
        assert!(bus.all("spirit:busInterface").any(|i| name_of(i) == qid));
        let port = format!("{}_AWVALID", qid);
        assert!(ports.all("spirit:port").any(|p| name_of(p) == port));
        let param = format!("C_{}_DATA_WIDTH", qid);
        assert!(model_params
            .all("spirit:modelParameter")
            .any(|p| name_of(p) == param));
        match role.bus_role() {
            BusRole::Master => {
                let spaces = top.first("spirit:addressSpaces").unwrap();
                assert!(spaces.all("spirit:addressSpace").any(|s| name_of(s) == qid));
            }
            BusRole::Slave => {
                let maps = top.first("spirit:memoryMaps").unwrap();
                assert!(maps.all("spirit:memoryMap").any(|m| name_of(m) == qid));
            }
        }
    }
    Ok(())
}

#[test]
fn test_ordering_matches_across_parameter_blocks() -> SpiritResult<()> {
    let mut t0 = Thread::new("t0");
    t0.memories.push(Endpoint::new("mem0", 32));
    t0.ioregisters.push(Endpoint::new("reg0", 32));
    let mut cfg = ComponentConfig::new("Ordered");
    cfg.threads.push(t0);

    let top = generate_tree(&cfg)?;
    let order_of = |p: &Element| -> Option<String> {
        p.first("spirit:value")
            .and_then(|v| v.attr_value("spirit:order"))
            .map(String::from)
    };

    let model = top.first("spirit:model").unwrap();
    let model_orders: Vec<String> = model
        .first("spirit:modelParameters")
        .unwrap()
        .all("spirit:modelParameter")
        .filter_map(order_of)
        .collect();

    let param_orders: Vec<String> = top
        .first("spirit:parameters")
        .unwrap()
        .all("spirit:parameter")
        .filter(|p| name_of(p) != "Component_Name")
        .filter_map(order_of)
        .collect();

    // Same sequence in both blocks, contiguous from 2
    // (1 belongs to Component_Name)
    assert_eq!(model_orders, param_orders);
    let expected: Vec<String> = (2..2 + model_orders.len()).map(|i| i.to_string()).collect();
    assert_eq!(model_orders, expected);
    // 8 fields for the master + 8 for the (non-lite) slave
    assert_eq!(model_orders.len(), 16);
    Ok(())
}

#[test]
fn test_clock_reset_interfaces() -> SpiritResult<()> {
    let top = generate_tree(&memory_config())?;
    let bus = top.first("spirit:busInterfaces").unwrap();
    let ifaces: Vec<&Element> = bus.all("spirit:busInterface").collect();

    let param_text = |iface: &Element, pname: &str| -> Option<String> {
        let mut params = Vec::new();
        descendants(iface, "spirit:parameter", &mut params);
        params
            .iter()
            .find(|p| name_of(p) == pname)
            .and_then(|p| p.first("spirit:value"))
            .and_then(|v| v.text_content())
            .map(String::from)
    };

    // Reset: active-low, bound to the interface's ARESETN port
    let rst = ifaces[1];
    assert_eq!(param_text(rst, "POLARITY").as_deref(), Some("ACTIVE_LOW"));
    let mut names = Vec::new();
    descendants(rst, "spirit:physicalPort", &mut names);
    assert_eq!(name_of(names[0]), "t0_mem0_AXI_ARESETN");

    // Clock: associated with the data interface and its reset
    let clk = ifaces[2];
    assert_eq!(
        param_text(clk, "ASSOCIATED_BUSIF").as_deref(),
        Some("t0_mem0_AXI")
    );
    assert_eq!(
        param_text(clk, "ASSOCIATED_RESET").as_deref(),
        Some("t0_mem0_AXI_ARESETN")
    );
    Ok(())
}

#[test]
fn test_component_port_list() -> SpiritResult<()> {
    let top = generate_tree(&memory_config())?;
    let ports = top
        .first("spirit:model")
        .unwrap()
        .first("spirit:ports")
        .unwrap();
    let port_names: Vec<&str> = ports.all("spirit:port").map(name_of).collect();

    // Component clock/reset, thread clock/reset, protocol signals, interface clock/reset
    assert_eq!(port_names[0], "UCLK");
    assert_eq!(port_names[1], "URESETN");
    assert_eq!(port_names[2], "t0_CCLK");
    assert_eq!(port_names[3], "t0_CRESETN");
    assert_eq!(port_names[4], "t0_mem0_AXI_AWID");
    assert_eq!(port_names.len(), 4 + 42 + 2);
    assert_eq!(port_names[port_names.len() - 2], "t0_mem0_AXI_ACLK");
    assert_eq!(port_names[port_names.len() - 1], "t0_mem0_AXI_ARESETN");

    // Spot-check vector shapes: WDATA is parameter-dependent, AWLEN fixed [7:0],
    // AWVALID scalar
    let port = |n: &str| ports.all("spirit:port").find(|p| name_of(p) == n).unwrap();
    fn left(p: &Element) -> &Element {
        p.first("spirit:wire")
            .unwrap()
            .first("spirit:vector")
            .unwrap()
            .first("spirit:left")
            .unwrap()
    }
    let wdata = left(port("t0_mem0_AXI_WDATA"));
    assert_eq!(wdata.attr_value("spirit:resolve"), Some("dependent"));
    assert_eq!(wdata.text_content(), Some("31"));
    let awlen = left(port("t0_mem0_AXI_AWLEN"));
    assert_eq!(awlen.attr_value("spirit:resolve"), Some("immediate"));
    assert_eq!(awlen.text_content(), Some("7"));
    let awvalid = port("t0_mem0_AXI_AWVALID");
    assert!(awvalid
        .first("spirit:wire")
        .unwrap()
        .first("spirit:vector")
        .is_none());
    Ok(())
}

#[test]
fn test_id_user_port_drivers() -> SpiritResult<()> {
    // Transaction-ID and sideband-user ports carry a zero default-value
    // driver after their wire type definitions; no other port does
    let top = generate_tree(&memory_config())?;
    let ports = top
        .first("spirit:model")
        .unwrap()
        .first("spirit:ports")
        .unwrap();
    let driver_of = |n: &str| {
        ports
            .all("spirit:port")
            .find(|p| name_of(p) == n)
            .unwrap()
            .first("spirit:wire")
            .unwrap()
            .first("spirit:driver")
            .cloned()
    };
    for n in ["AWID", "BID", "ARID", "RID", "AWUSER", "ARUSER", "WUSER", "RUSER", "BUSER"] {
        let driver = driver_of(&format!("t0_mem0_AXI_{}", n)).unwrap();
        assert_eq!(
            driver.first("spirit:defaultValue").unwrap().text_content(),
            Some("0")
        );
    }
    // Vectored, scalar, and non-protocol ports are undriven
    for n in ["t0_mem0_AXI_AWADDR", "t0_mem0_AXI_AWVALID", "UCLK", "t0_CCLK"] {
        assert!(driver_of(n).is_none());
    }
    // The lite signal set keeps none of the driven ports
    let xml = generate(&register_config(true))?;
    assert!(!xml.contains("spirit:driver"));
    Ok(())
}

#[test]
fn test_empty_component_skeleton() -> SpiritResult<()> {
    let cfg = ComponentConfig::new("Bare");
    let top = generate_tree(&cfg)?;

    // Endpoint-derived sections collapse or vanish
    assert_eq!(
        top.first("spirit:busInterfaces")
            .unwrap()
            .all("spirit:busInterface")
            .count(),
        0
    );
    assert!(top.first("spirit:addressSpaces").is_none());
    assert!(top.first("spirit:memoryMaps").is_none());

    // Static sections persist
    let model = top.first("spirit:model").unwrap();
    assert_eq!(
        model.first("spirit:views").unwrap().all("spirit:view").count(),
        5
    );
    assert_eq!(
        top.first("spirit:choices").unwrap().all("spirit:choice").count(),
        6
    );
    assert_eq!(
        top.first("spirit:fileSets").unwrap().all("spirit:fileSet").count(),
        5
    );

    // Component_Name is always present, at display-order 1
    let params = top.first("spirit:parameters").unwrap();
    let cname = params.first("spirit:parameter").unwrap();
    assert_eq!(name_of(cname), "Component_Name");
    let value = cname.first("spirit:value").unwrap();
    assert_eq!(value.attr_value("spirit:order"), Some("1"));
    assert_eq!(value.text_content(), Some("bare_v1_0"));
    Ok(())
}

#[test]
fn test_deterministic_output() -> SpiritResult<()> {
    let cfg = register_config(true);
    assert_eq!(generate(&cfg)?, generate(&cfg)?);
    let cfg = memory_config();
    assert_eq!(generate(&cfg)?, generate(&cfg)?);
    Ok(())
}

#[test]
fn test_extra_ports_and_params() -> SpiritResult<()> {
    let mut cfg = memory_config();
    cfg.extra_ports.push(ExtraPort {
        name: "irq".into(),
        direction: PortDirection::Out,
        msb: None,
    });
    cfg.extra_ports.push(ExtraPort {
        name: "gpio".into(),
        direction: PortDirection::InOut,
        msb: Some(3),
    });
    cfg.extra_params.push(ExtraParam {
        name: "NUM_LEDS".into(),
        value: "4".into(),
        tp: ParamType::Integer,
    });
    cfg.extra_params.push(ExtraParam {
        name: "BOARD".into(),
        value: "zedboard".into(),
        tp: ParamType::String,
    });

    let top = generate_tree(&cfg)?;
    let ports = top
        .first("spirit:model")
        .unwrap()
        .first("spirit:ports")
        .unwrap();
    let port = |n: &str| ports.all("spirit:port").find(|p| name_of(p) == n).unwrap();

    // Extras land after the derived ports, shaped by their msb field
    let irq = port("irq").first("spirit:wire").unwrap();
    assert_eq!(
        irq.first("spirit:direction").unwrap().text_content(),
        Some("out")
    );
    assert!(irq.first("spirit:vector").is_none());
    let gpio = port("gpio").first("spirit:wire").unwrap();
    let left = gpio
        .first("spirit:vector")
        .unwrap()
        .first("spirit:left")
        .unwrap();
    assert_eq!(left.attr_value("spirit:resolve"), Some("immediate"));
    assert_eq!(left.text_content(), Some("3"));

    // Extra parameters appear in both blocks, generated vs. user resolve,
    // without ordering attributes
    let find = |parent: &Element, tag: &str, n: &str| -> Element {
        parent.all(tag).find(|p| name_of(p) == n).unwrap().clone()
    };
    let model_params = top
        .first("spirit:model")
        .unwrap()
        .first("spirit:modelParameters")
        .unwrap()
        .clone();
    let mp = find(&model_params, "spirit:modelParameter", "NUM_LEDS");
    let mv = mp.first("spirit:value").unwrap();
    assert_eq!(mv.attr_value("spirit:resolve"), Some("generated"));
    assert_eq!(mv.attr_value("spirit:format"), Some("long"));
    assert_eq!(mv.attr_value("spirit:order"), None);
    assert_eq!(mv.text_content(), Some("4"));

    let params = top.first("spirit:parameters").unwrap().clone();
    let tp = find(&params, "spirit:parameter", "NUM_LEDS");
    let tv = tp.first("spirit:value").unwrap();
    assert_eq!(tv.attr_value("spirit:resolve"), Some("user"));
    assert_eq!(tv.attr_value("spirit:id"), Some("PARAM_VALUE.NUM_LEDS"));

    // String-typed extras omit the numeric format marker
    let bp = find(&params, "spirit:parameter", "BOARD");
    let bv = bp.first("spirit:value").unwrap();
    assert_eq!(bv.attr_value("spirit:format"), None);
    assert_eq!(bv.text_content(), Some("zedboard"));
    Ok(())
}

#[test]
fn test_hidden_width_parameters() -> SpiritResult<()> {
    // Address/data widths are user-resolvable but hidden from the UI
    let top = generate_tree(&memory_config())?;
    let params = top.first("spirit:parameters").unwrap();
    let param = |n: &str| {
        params
            .all("spirit:parameter")
            .find(|p| name_of(p) == n)
            .unwrap()
    };
    let addr = param("C_t0_mem0_AXI_ADDR_WIDTH");
    let marker = addr
        .first("spirit:vendorExtensions")
        .unwrap()
        .first("xilinx:parameterInfo")
        .unwrap()
        .first("xilinx:enablement")
        .unwrap()
        .first("xilinx:isEnabled")
        .unwrap();
    assert_eq!(marker.text_content(), Some("false"));
    // The clamped thread-ID width stays visible
    let tid = param("C_t0_mem0_AXI_THREAD_ID_WIDTH");
    assert!(tid.first("spirit:vendorExtensions").is_none());
    Ok(())
}

#[test]
fn test_writer_output() -> SpiritResult<()> {
    // Declaration first, escaping in both attributes and text,
    // inline text elements, self-closing empties
    let e = Element::new("root")
        .attr("label", "a\"b<c")
        .child(Element::text_elem("msg", "x & y < z"))
        .child(Element::new("hollow"));
    let out = write::to_string(&e)?;
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
    assert_eq!(lines[1], "<root label=\"a&quot;b&lt;c\">");
    assert_eq!(lines[2], "  <msg>x &amp; y &lt; z</msg>");
    assert_eq!(lines[3], "  <hollow/>");
    assert_eq!(lines[4], "</root>");
    Ok(())
}

#[test]
fn test_descriptor_header_and_extensions() -> SpiritResult<()> {
    let mut cfg = memory_config();
    cfg.vendor = "acme".into();
    cfg.library = "ip".into();
    cfg.version = "2.1".into();
    cfg.description = "test core".into();
    let top = generate_tree(&cfg)?;

    // Root children in fixed document order
    let kids: Vec<&str> = top.elems().map(|e| e.name.as_str()).collect();
    assert_eq!(
        kids,
        vec![
            "spirit:vendor",
            "spirit:library",
            "spirit:name",
            "spirit:version",
            "spirit:busInterfaces",
            "spirit:addressSpaces",
            "spirit:model",
            "spirit:choices",
            "spirit:fileSets",
            "spirit:description",
            "spirit:parameters",
            "spirit:vendorExtensions"
        ]
    );
    assert_eq!(top.first("spirit:vendor").unwrap().text_content(), Some("acme"));
    assert_eq!(
        top.first("spirit:description").unwrap().text_content(),
        Some("test core")
    );

    // Packaging metadata block
    let ext = top.first("spirit:vendorExtensions").unwrap();
    let core = ext.first("xilinx:coreExtensions").unwrap();
    assert_eq!(
        core.first("xilinx:displayName").unwrap().text_content(),
        Some("userlogic_v1_0")
    );
    let info = ext.first("xilinx:packagingInfo").unwrap();
    assert_eq!(
        info.first("xilinx:xilinxVersion").unwrap().text_content(),
        Some("2014.4")
    );

    // Filesets key off the lower-cased name
    let xml = generate(&cfg)?;
    assert!(xml.contains("hdl/verilog/userlogic.v"));
    assert!(xml.contains("test/test_userlogic.v"));
    assert!(xml.contains("data/userlogic.xdc"));
    Ok(())
}

#[test]
fn test_config_serde_roundtrip() -> SpiritResult<()> {
    let mut cfg = register_config(true);
    cfg.extra_params.push(ExtraParam {
        name: "NUM_LEDS".into(),
        value: "4".into(),
        tp: ParamType::Integer,
    });
    let ser = Json.to_string(&cfg)?;
    let back: ComponentConfig = Json.from_str(&ser)?;
    assert_eq!(cfg, back);
    Ok(())
}

#[test]
fn test_config_builder() -> SpiritResult<()> {
    // Builder defaults mirror [ComponentConfig::new]
    let thread = ThreadBuilder::default()
        .name("t0")
        .memories(vec![Endpoint::new("mem0", 64)])
        .build()
        .unwrap();
    let cfg = ComponentConfigBuilder::default()
        .name("Built")
        .threads(vec![thread])
        .build()
        .unwrap();
    assert_eq!(cfg.addr_width, 32);
    assert_eq!(cfg.burst_length, 256);
    assert_eq!(cfg.vendor, "spirit21");
    assert!(!cfg.lite);

    // And the built configuration generates
    let top = generate_tree(&cfg)?;
    let space = top
        .first("spirit:addressSpaces")
        .unwrap()
        .first("spirit:addressSpace")
        .unwrap();
    assert_eq!(name_of(space), "t0_mem0_AXI");
    Ok(())
}
