mod fixtures;

use firlab::FirError;
use firlab::config::DeviceConfig;
use firlab::device::{
    ControlWord, DeviceChannel, EmulatedDevice, RegisterMap, configure_filter, stream_samples,
};
use firlab::io::CoefficientTable;
use firlab::processing::{INPUT_LABEL, run_hardware, run_software};
use fixtures::{P0_CFG, P4_CFG, SQUARE_SAMPLES, SQUARE_VEC, Workspace};

#[test]
fn test_emulated_run_matches_host() {
    let ws = Workspace::new("emulated_run");
    let vector = ws.file("square.vec", SQUARE_VEC);
    let configs = vec![ws.file("p0.cfg", P0_CFG), ws.file("p4.cfg", P4_CFG)];

    let device_config = DeviceConfig::default();
    let mut device = EmulatedDevice::new(device_config.registers());
    let (input, runs) = run_hardware(&mut device, &device_config, &vector, &configs).unwrap();

    assert_eq!(input.label, INPUT_LABEL);
    assert_eq!(input.values.len(), SQUARE_SAMPLES.len());
    assert_eq!(runs.len(), 2);
    for run in &runs {
        assert_eq!(run.first_mismatch(), None, "{}", run.series.label);
    }

    assert_eq!(
        runs[0].series.values,
        vec![0, 0, 100, 200, 200, 200, 100, 0, 0, 0]
    );
    // On the device a disabled tap keeps its delay slot
    assert_eq!(
        runs[1].series.values,
        vec![0, 0, 200, 200, 300, 300, 100, 100, 0, 0]
    );
}

#[test]
fn test_all_taps_enabled_agrees_with_software_path() {
    let ws = Workspace::new("all_taps_enabled");
    let vector = ws.file("square.vec", SQUARE_VEC);
    let cfg = ws.file("full.cfg", "coef,en,value\n0,1,4\n1,1,3\n2,1,2\n3,1,1\n");

    let device_config = DeviceConfig::default();
    let mut device = EmulatedDevice::new(device_config.registers());
    let (_, runs) = run_hardware(&mut device, &device_config, &vector, &[cfg.clone()]).unwrap();
    let software = run_software(&vector, &[cfg]).unwrap();

    assert_eq!(runs[0].series.values, software[0].values);
}

#[test]
fn test_reconfiguration_clears_history() {
    let mut device = EmulatedDevice::default();
    let map = RegisterMap::default();
    let table = CoefficientTable::parse(
        "coef,en,value\n0,1,1\n1,1,1\n2,1,1\n3,1,1\n",
        std::path::Path::new("sum4.cfg"),
    )
    .unwrap();

    configure_filter(&mut device, &map, &table, None).unwrap();
    assert_eq!(stream_samples(&mut device, &[1, 1, 1]).unwrap(), vec![1, 2, 3]);

    // TCLR in the configuration sequence empties the delay line
    configure_filter(&mut device, &map, &table, None).unwrap();
    assert_eq!(stream_samples(&mut device, &[1]).unwrap(), vec![1]);
}

#[test]
fn test_custom_register_map() {
    let ws = Workspace::new("custom_register_map");
    let vector = ws.file("ramp.vec", "1\n2\n3\n");
    let cfg = ws.file("p0.cfg", P0_CFG);

    let device_config = DeviceConfig {
        csr_address: 0x100,
        coef_address: 0x104,
        base_csr: Some(0),
        ..DeviceConfig::default()
    };
    let mut device = EmulatedDevice::new(device_config.registers());
    let (_, runs) = run_hardware(&mut device, &device_config, &vector, &[cfg]).unwrap();

    assert_eq!(runs[0].series.values, vec![1, 3, 5]);
    assert!(device.write_log().iter().all(|&(addr, _)| addr == 0x100 || addr == 0x104));
    assert_eq!(
        device.read_register(0x100).unwrap(),
        (ControlWord::FEN | ControlWord::C0EN | ControlWord::C1EN).bits()
    );
    assert_eq!(device.coef(), 0x0000_0101);
}

#[test]
fn test_missing_tap_aborts_run() {
    let ws = Workspace::new("missing_tap_aborts");
    let vector = ws.file("square.vec", SQUARE_VEC);
    let cfg = ws.file("short.cfg", "coef,en,value\n0,1,1\n1,1,1\n2,1,1\n");

    let device_config = DeviceConfig::default();
    let mut device = EmulatedDevice::new(device_config.registers());
    let err = run_hardware(&mut device, &device_config, &vector, &[cfg]).unwrap_err();

    match err {
        FirError::MissingTap(missing) => assert_eq!(missing, vec![3]),
        other => panic!("expected MissingTap, got {other}"),
    }
    assert!(device.write_log().is_empty());
}
