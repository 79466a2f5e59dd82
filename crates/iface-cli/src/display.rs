use ifacepp::workflows::analyze::InterfaceReport;
use ifacepp::workflows::compare::PoseComparison;
use std::fmt::Write;

pub fn format_report(report: &InterfaceReport) -> String {
    let mut out = String::new();
    let chains: String = report.chains.iter().collect();
    let _ = writeln!(
        out,
        "Interface '{}' (model {}, chains {})",
        report.id, report.model, chains
    );
    let _ = writeln!(
        out,
        "  residues: {:>6}    contacts: {:>6}",
        report.residue_count, report.contact_count
    );
    let c = &report.composition;
    let _ = writeln!(
        out,
        "  composition: polar {:.3}  apolar {:.3}  charged {:.3}",
        c.polar, c.apolar, c.charged
    );
    match &report.bsa {
        Some(bsa) => {
            let _ = writeln!(
                out,
                "  buried surface area: {:.2} A^2 (chains {:.2} + {:.2}, complex {:.2})",
                bsa.buried, bsa.chain_a, bsa.chain_b, bsa.complex
            );
        }
        None => {
            let _ = writeln!(out, "  buried surface area: n/a (not a two-chain interface)");
        }
    }
    out
}

pub fn format_comparisons(results: &[PoseComparison]) -> String {
    let width = results
        .iter()
        .map(|r| r.label.len())
        .max()
        .unwrap_or(0)
        .max("pose".len());

    let mut out = String::new();
    let _ = writeln!(out, "{:<width$}  {:>8}  {:>8}", "pose", "fcc", "irmsd");
    let mut failures = Vec::new();
    for result in results {
        let _ = writeln!(
            out,
            "{:<width$}  {:>8}  {:>8}",
            result.label,
            cell(&result.fcc, 3),
            cell(&result.rmsd, 3),
        );
        for (metric, value) in [("fcc", &result.fcc), ("irmsd", &result.rmsd)] {
            if let Err(message) = value {
                failures.push(format!("{} [{}]: {}", result.label, metric, message));
            }
        }
    }
    for failure in failures {
        let _ = writeln!(out, "  ! {}", failure);
    }
    out
}

fn cell(value: &Result<f64, String>, precision: usize) -> String {
    match value {
        Ok(v) => format!("{:.*}", precision, v),
        Err(_) => "-".to_string(),
    }
}
