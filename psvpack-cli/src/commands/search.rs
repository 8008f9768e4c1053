use std::io::Write;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use psvpack_catalog::ReqwestClient;
use psvpack_core::{CatalogRecord, ListId, Region};
use psvpack_lib::display::{NO_RESULTS, format_row_with_warnings, table_header, table_rule};
use psvpack_lib::{Config, SearchService};

use crate::error::CliError;

/// Search a catalog and print the matches as a table.
pub(crate) fn run_search(
    config: &Config,
    list: ListId,
    term: &str,
    regions: &[Region],
) -> Result<(), CliError> {
    let http = ReqwestClient::new()?;
    let results = SearchService::new(config, &http).run(list, term, regions)?;

    if let Some(updated) = results.last_update {
        log::debug!("{} catalog last updated {}", list, updated.to_rfc2822());
    }

    // Results are command output, not log records: --quiet leaves them alone.
    let stdout = std::io::stdout();
    write_results(&mut stdout.lock(), &results.records, list)?;
    log::debug!("{} results", results.records.len());
    Ok(())
}

fn write_results(
    out: &mut impl Write,
    records: &[CatalogRecord],
    list: ListId,
) -> std::io::Result<()> {
    if records.is_empty() {
        return writeln!(out, "{}", NO_RESULTS.if_supports_color(Stdout, |t| t.dimmed()));
    }

    writeln!(out, "{}", table_header().if_supports_color(Stdout, |t| t.bold()))?;
    writeln!(out, "{}", table_rule())?;
    for record in records {
        writeln!(out, "{}", format_row_with_warnings(record, list))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use psvpack_core::RecordKind;

    fn record() -> CatalogRecord {
        CatalogRecord {
            kind: RecordKind::Title,
            title_id: "PCSE00001".into(),
            content_id: "UP0001-PCSE00001_00-0000000000000000".into(),
            region: Region::Us,
            name: "Test Game".into(),
            original_name: None,
            app_version: None,
            file_size: 1536,
            last_modified: None,
            package_url: None,
            license_key: Some("KO5ifR1dQ+eHBlADAA".into()),
            checksum: String::new(),
        }
    }

    fn render(records: &[CatalogRecord]) -> Vec<String> {
        let mut out = Vec::new();
        write_results(&mut out, records, ListId::Psv).unwrap();
        let text = strip_ansi_escapes::strip_str(String::from_utf8(out).unwrap());
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn test_no_results_line() {
        assert_eq!(render(&[]), vec![NO_RESULTS.to_string()]);
    }

    #[test]
    fn test_table_rows_carry_warnings() {
        let lines = render(&[record()]);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], table_header());
        assert_eq!(lines[1], table_rule());
        assert_eq!(
            lines[2],
            "PCSE00001        US   1.5 KiB  Test Game <NO PKG LINK!>"
        );
    }
}
