//! Demonstration of the indoor positioning pipeline: catalog ingestion,
//! scan cycles through a mock scanner, and session updates for a renderer.

use indoor_positioning::{
    haversine_distance, parse_feed, BeaconCatalog, CsvFormatter, GeoPoint, JsonFormatter,
    LogLevel, MockScanner, PositioningSession, ProximityReading, ScanError, SessionConfig,
    SheetReader, TextFormatter,
};

const FEED_BODY: &str = r#"[
    ["f0:9f:c2:00:00:01", 4.477700, 51.022400, 2],
    ["f0:9f:c2:00:00:02", 4.477800, 51.022400, 2],
    ["f0:9f:c2:00:00:03", "4.477700", "51.022500", "2"]
]"#;

const SHEET_BODY: &str = "\
device_id,device_name,mac_address,longitude,latitude,floor
4,Stairwell North,f0:9f:c2:00:00:04,4.477800,51.022500,3
5,Stairwell South,f0:9f:c2:00:00:05,4.477750,51.022350,1
";

fn main() {
    println!("=== Indoor Positioning Demo ===\n");

    // One-shot catalog ingestion, before any localization
    let mut catalog = BeaconCatalog::new();
    match parse_feed(FEED_BODY) {
        Ok(beacons) => {
            println!("Feed delivered {} beacons", beacons.len());
            catalog.extend(beacons);
        }
        Err(e) => {
            eprintln!("Feed rejected: {}", e);
            return;
        }
    }
    match SheetReader::new().parse(SHEET_BODY) {
        Ok(beacons) => {
            println!("Survey sheet delivered {} beacons", beacons.len());
            catalog.extend(beacons);
        }
        Err(e) => {
            eprintln!("Sheet rejected: {}", e);
            return;
        }
    }
    println!("Catalog holds {} beacons\n", catalog.len());

    // Scripted scan cycles: the device stands near the floor-2 beacons,
    // also hearing the floor-3 stairwell beacon through the ceiling
    let device = GeoPoint::new(4.477745, 51.022445);
    let distance_to = |mac: &str| {
        let beacon = catalog.get(mac).expect("scripted mac is cataloged");
        haversine_distance(&beacon.location, &device)
    };
    let slant_to = |mac: &str, vertical_m: f64| {
        let horizontal = distance_to(mac);
        (horizontal * horizontal + vertical_m * vertical_m).sqrt()
    };

    let mut scanner = MockScanner::new();
    scanner.queue_batch(vec![
        ProximityReading::new("f0:9f:c2:00:00:01", distance_to("f0:9f:c2:00:00:01"), -58),
        ProximityReading::new("f0:9f:c2:00:00:02", distance_to("f0:9f:c2:00:00:02"), -61),
        ProximityReading::new("f0:9f:c2:00:00:03", distance_to("f0:9f:c2:00:00:03"), -63),
        ProximityReading::new("f0:9f:c2:00:00:04", slant_to("f0:9f:c2:00:00:04", 3.0), -78),
        ProximityReading::new("de:ad:be:ef:00:00", 2.5, -40),
    ]);
    scanner.queue_batch(vec![
        // The stairwell beacon fades out of range
        ProximityReading::new("f0:9f:c2:00:00:04", 25.0, -95),
    ]);
    scanner.fail_next(ScanError::Timeout { timeout_ms: 250 });

    let config = SessionConfig::default().with_log_level(LogLevel::Info);
    let mut session = PositioningSession::with_config(catalog, Box::new(scanner), config);

    let text = TextFormatter::new();
    let compact = TextFormatter::compact();
    let json = JsonFormatter::pretty();
    let csv = CsvFormatter {
        include_header: true,
    };

    // The injected timeout fires on the first poll
    for cycle in 1..=4 {
        println!("--- Cycle {} ---", cycle);
        match session.poll_update() {
            Ok(Some(update)) => {
                print!("{}", text.format_text(&update));
                println!("  {}", compact.format_text(&update));
                if update.sequence == 1 {
                    match json.format_json(&update) {
                        Ok(body) => println!("{}", body),
                        Err(e) => eprintln!("JSON formatting failed: {}", e),
                    }
                    println!("{}", csv.format_csv(&update));
                }
            }
            Ok(None) => println!("nothing new to draw"),
            Err(e) => {
                println!("cycle failed: {}", e);
                match session.last_known() {
                    Some(update) => println!("  renderer keeps {}", compact.format_text(update)),
                    None => println!("  no position to fall back on yet"),
                }
            }
        }
        println!();
    }

    let state = session.state();
    println!(
        "Session: {} updates, {} errors, {} readings skipped",
        state.updates_delivered, state.error_count, state.readings_skipped
    );
    println!(
        "Scanner: {} batches, {} errors",
        session.scanner_status().batches_received,
        session.scanner_status().error_count
    );
}
