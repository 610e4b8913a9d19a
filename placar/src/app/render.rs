use placar_common::views::{AdminView, BoardView};
use std::fmt::Write;

const RULE: &str = "==============================================";

pub fn render_board(view: &BoardView) -> String {
    let mut out = String::new();
    // Writing to a String can't fail
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "  [{}] {:<20} {:>2}  x  {:<2} {:>20} [{}]",
        view.left.badge,
        view.left.name,
        view.left.score,
        view.right.score,
        view.right.name,
        view.right.badge,
    );
    let _ = writeln!(
        out,
        "  {:^20}  {:^5}  {:^15}",
        view.period,
        view.timer_text,
        view.status.to_string()
    );
    let _ = write!(out, "{RULE}");
    out
}

pub fn render_admin(view: &AdminView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "---- admin ----");
    for (side, team) in &view.teams {
        let _ = writeln!(
            out,
            "  {side}: {:<20} {:>2}  (name: {:?})",
            team.label, team.score, team.name
        );
    }
    let _ = writeln!(out, "  time: {}  [{}]", view.timer_text, view.status);
    let _ = write!(
        out,
        "  `toggle`: {}, `1` / `2` to score",
        view.toggle_label
    );
    out
}
