use super::*;

const HEADER: &str = "Title ID\tRegion\tName\tPKG direct link\tzRIF\tContent ID\tLast Modification Date\tOriginal Name\tFile Size\tSHA256\tApp Version";

fn catalog(rows: &[&str]) -> String {
    let mut out = String::from(HEADER);
    for row in rows {
        out.push('\n');
        out.push_str(row);
    }
    out.push('\n');
    out
}

#[test]
fn test_parse_full_row() {
    let content = catalog(&[
        "PCSE00001\tUS\tTest Game\thttp://example/x.pkg\tKO5ifR1dQ+eHBlWe\tUP0001-PCSE00001_00-0000000000000000\t2017-05-12 08:23:11\tテスト\t123456\tABCDEF\t01.02",
    ]);
    let records = parse_catalog(&content, RecordKind::Title).unwrap();
    assert_eq!(records.len(), 1);

    let r = &records[0];
    assert_eq!(r.title_id, "PCSE00001");
    assert_eq!(r.content_id, "UP0001-PCSE00001_00-0000000000000000");
    assert_eq!(r.region, Region::Us);
    assert_eq!(r.name, "Test Game");
    assert_eq!(r.original_name.as_deref(), Some("テスト"));
    assert_eq!(r.app_version.as_deref(), Some("01.02"));
    assert_eq!(r.file_size, 123456);
    assert_eq!(r.package_url.as_deref(), Some("http://example/x.pkg"));
    assert_eq!(r.license_key.as_deref(), Some("KO5ifR1dQ+eHBlWe"));
    assert_eq!(r.checksum, "abcdef");
    assert!(r.last_modified_at().is_some());
}

#[test]
fn test_missing_sentinels_become_none() {
    let content = catalog(&[
        "PCSE00002\tJP\tNo Key\tMISSING\tMISSING\tJP0001-PCSE00002_00-0000000000000000\t\t\tMISSING\t\t",
    ]);
    let records = parse_catalog(&content, RecordKind::Title).unwrap();
    let r = &records[0];
    assert_eq!(r.package_url, None);
    assert_eq!(r.license_key, None);
    assert_eq!(r.original_name, None);
    assert_eq!(r.file_size, 0);
    assert_eq!(r.checksum, "");
}

#[test]
fn test_column_order_does_not_matter() {
    let content = "Name\tContent ID\tRegion\tTitle ID\nReordered\tEP0001-PCSB00009_00-0000000000000000\teu\tPCSB00009\n";
    let records = parse_catalog(content, RecordKind::Title).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Reordered");
    assert_eq!(records[0].region, Region::Eu);
    assert_eq!(records[0].title_id, "PCSB00009");
}

#[test]
fn test_missing_required_column_fails() {
    let content = "Title ID\tName\nPCSE00001\tNo Content Id\n";
    let err = parse_catalog(content, RecordKind::Title).unwrap_err();
    assert!(matches!(err, CatalogError::ParseFailed(_)));
}

#[test]
fn test_header_only_is_empty_success() {
    let records = parse_catalog(&catalog(&[]), RecordKind::Title).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_skips_unknown_region_and_duplicates() {
    let content = catalog(&[
        "PCSE00001\tUS\tFirst\tMISSING\tMISSING\tUP0001-PCSE00001_00-0000000000000000\t\t\t1\t\t",
        "PCSE00001\tUS\tDuplicate\tMISSING\tMISSING\tUP0001-PCSE00001_00-0000000000000000\t\t\t1\t\t",
        "PCSE00003\tINT\tUnknown Region\tMISSING\tMISSING\tXX0001-PCSE00003_00-0000000000000000\t\t\t1\t\t",
        "PCSE00004\tASIA\tKept\tMISSING\tMISSING\tHP0001-PCSE00004_00-0000000000000000\t\t\t1\t\t",
    ]);
    let records = parse_catalog(&content, RecordKind::Title).unwrap();
    let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Kept"]);
}

#[test]
fn test_skips_ids_that_escape_the_install_dir() {
    let content = catalog(&[
        "PCSE00001\tUS\tEscaping Content\tMISSING\tMISSING\t../../ESCAPED-X\t\t\t1\t\t",
        "../X\tUS\tEscaping Title\tMISSING\tMISSING\tUP0001-PCSE00002_00-0000000000000000\t\t\t1\t\t",
        "PCSE00003\tUS\tBackslash\tMISSING\tMISSING\tUP0001\\PCSE00003\t\t\t1\t\t",
        "PCSE00004\tUS\tKept\tMISSING\tMISSING\tUP0001-PCSE00004_00-0000000000000000\t\t\t1\t\t",
        "\tUS\tNo Title Id\tMISSING\tMISSING\tUP0001-PCSE00005_00-0000000000000000\t\t\t1\t\t",
    ]);
    let records = parse_catalog(&content, RecordKind::Title).unwrap();
    let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Kept", "No Title Id"]);
}

#[test]
fn test_quotes_are_literal() {
    let content = catalog(&[
        "PCSE00005\tUS\t\"Quoted\" Game\tMISSING\tMISSING\tUP0001-PCSE00005_00-0000000000000000\t\t\t1\t\t",
    ]);
    let records = parse_catalog(&content, RecordKind::Title).unwrap();
    assert_eq!(records[0].name, "\"Quoted\" Game");
}

#[test]
fn test_dlc_kind_is_applied() {
    let content = catalog(&[
        "PCSE00001\tUS\tExtra Pack\thttp://example/dlc.pkg\tKEY\tUP0001-PCSE00001_00-EXTRAPACK0000001\t\t\t10\t\t",
    ]);
    let records = parse_catalog(&content, RecordKind::Dlc).unwrap();
    assert!(records[0].is_dlc());
    assert_eq!(records[0].content_suffix(), "EXTRAPACK0000001");
}

#[test]
fn test_bom_is_stripped() {
    let content = format!("\u{feff}{}", catalog(&[
        "PCSE00001\tUS\tBom\tMISSING\tMISSING\tUP0001-PCSE00001_00-0000000000000000\t\t\t1\t\t",
    ]));
    let records = parse_catalog(&content, RecordKind::Title).unwrap();
    assert_eq!(records.len(), 1);
}
