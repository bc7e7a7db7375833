//! Console OK/KO markers and the end-of-run summary table.

use std::io::IsTerminal;

use super::ledger::ResultLedger;

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[39m";

#[derive(Debug, Clone)]
pub struct Markers {
    ok: String,
    ko: String,
}

impl Markers {
    pub fn new(no_color: bool) -> Self {
        if no_color || !std::io::stdout().is_terminal() {
            Self {
                ok: "[ OK ]".to_owned(),
                ko: "[ KO ]".to_owned(),
            }
        } else {
            Self {
                ok: format!("{}[ OK ]{}", GREEN, RESET),
                ko: format!("{}[ KO ]{}", RED, RESET),
            }
        }
    }

    pub fn ok(&self) -> &str {
        &self.ok
    }

    pub fn ko(&self) -> &str {
        &self.ko
    }

    pub fn pick(&self, success: bool) -> &str {
        if success { self.ok() } else { self.ko() }
    }
}

pub(crate) fn print_summary(ledger: &ResultLedger, markers: &Markers) {
    println!();
    println!("----- ALL_TEST_STAT -----");
    println!();
    for name in ledger.scenario_names() {
        println!(
            "{:<30} {} {:>3},   {} {:>3}",
            name.to_uppercase(),
            markers.ok(),
            ledger.success_count(name),
            markers.ko(),
            ledger.fail_count(name)
        );
    }
    let (success, fail) = ledger.totals();
    println!();
    println!(
        "TOTAL : {} {:>3}, {} {:>3}",
        markers.ok(),
        success,
        markers.ko(),
        fail
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_markers_without_color() {
        let markers = Markers::new(true);
        assert_eq!(markers.ok(), "[ OK ]");
        assert_eq!(markers.ko(), "[ KO ]");
        assert_eq!(markers.pick(true), "[ OK ]");
        assert_eq!(markers.pick(false), "[ KO ]");
    }
}
