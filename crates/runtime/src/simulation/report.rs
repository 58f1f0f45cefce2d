//! Text and CSV renderings of simulation results.

use std::fmt::Write;

use super::{BalanceFlag, MatchupResult, SimulationReport};

const RULE: &str = "═══════════════════════════════════════════════════";

/// Human-readable balance report.
pub fn format_report(report: &SimulationReport) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "  CODEQUEST BALANCE REPORT - Monte Carlo Simulation");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "  Trials per matchup: {}", report.config.trials);
    let _ = writeln!(out, "  Total trials: {}", report.total_trials);
    let _ = writeln!(
        out,
        "  Overall win rate: {:.1}%",
        report.overall_win_rate * 100.0
    );
    let _ = writeln!(out, "  Duration: {}ms", report.duration.as_millis());
    let _ = writeln!(out);

    let _ = writeln!(out, "  Class     vs Monster          | Win%  | Avg Turns | Flag");
    let _ = writeln!(out, "  ─────────────────────────────-+───────+───────────+──────");
    for m in &report.matchups {
        let monster = format!("{} (S{})", m.monster_type, m.monster_severity);
        let flag = match m.flag {
            BalanceFlag::Ok => "  ✓".to_string(),
            other => format!(" ⚠ {other}"),
        };
        let _ = writeln!(
            out,
            "  {:<8} {:<22}| {:>5.1}% | {:>9.1} | {}",
            m.player_class.as_ref(),
            monster,
            m.win_rate * 100.0,
            m.avg_turns,
            flag
        );
    }

    let _ = writeln!(out);
    if report.flagged_matchups.is_empty() {
        let _ = writeln!(out, "  All matchups within target range.");
    } else {
        let _ = writeln!(
            out,
            "  ⚠ {} matchup(s) flagged for review",
            report.flagged_matchups.len()
        );
    }
    out.push_str(RULE);
    out
}

/// One CSV row per matchup, with a header line.
pub fn format_csv(results: &[MatchupResult]) -> String {
    let mut out = String::from(
        "class,level,monster,severity,complexity,trials,wins,losses,draws,\
         winRate,avgTurns,medianTurns,flag",
    );
    for m in results {
        let _ = write!(
            out,
            "\n{},{},{},{},{},{},{},{},{},{:.4},{:.1},{},{}",
            m.player_class,
            m.player_level,
            m.monster_type,
            m.monster_severity,
            m.monster_complexity,
            m.trials,
            m.victories,
            m.defeats,
            m.draws,
            m.win_rate,
            m.avg_turns,
            m.median_turns,
            m.flag
        );
    }
    out
}
