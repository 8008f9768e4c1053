const BYTE_UNITS: [&str; 6] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];
const BIT_UNITS: [&str; 6] = ["b", "Kib", "Mib", "Gib", "Tib", "Pib"];

/// Scale `value` down by 1024 until it fits below 1024 (or the largest unit
/// is reached). Returns the scaled value and the unit index.
fn scale(value: f64) -> (f64, usize) {
    let mut scaled = value;
    let mut unit = 0;
    while scaled >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }
    (scaled, unit)
}

fn render(mut scaled: f64, mut unit: usize, labels: &[&str; 6]) -> String {
    // 1023.95 and up would print as "1024.0"
    if unit > 0 && unit < labels.len() - 1 && (scaled * 10.0).round() >= 10240.0 {
        scaled /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", scaled as u64, labels[0])
    } else {
        format!("{:.1} {}", scaled, labels[unit])
    }
}

/// Format a byte count with binary prefixes (e.g., "0 B", "1.5 KiB", "1.0 GiB").
///
/// Picks the largest unit for which the printed value stays below 1024, so
/// 1048575 bytes is "1.0 MiB" rather than "1024.0 KiB". Plain bytes have no
/// decimals, every other unit gets one.
pub fn format_size(bytes: u64) -> String {
    let (scaled, unit) = scale(bytes as f64);
    render(scaled, unit, &BYTE_UNITS)
}

/// Format a transfer rate (e.g., "2.0 MiB/s").
///
/// With `bits` set, the rate is multiplied by 8 and labelled in bits
/// ("16.0 Mib/s").
pub fn format_rate(bytes_per_sec: f64, bits: bool) -> String {
    let value = if bits {
        bytes_per_sec.max(0.0) * 8.0
    } else {
        bytes_per_sec.max(0.0)
    };
    let (scaled, unit) = scale(value);
    let labels = if bits { &BIT_UNITS } else { &BYTE_UNITS };
    format!("{}/s", render(scaled, unit, labels))
}
