use threadline_core::{CellKind, Coord2, PlayEngine, PuzzleLayout};

const EMPTY: &str = ".";
const OBSTACLE: &str = "#";
const TRACED: &str = "*";

/// Plain grid: waypoint numbers, `#` for obstacles, `.` for open cells.
pub fn layout(layout: &PuzzleLayout) -> String {
    grid(layout, |_| false)
}

/// Grid with every traced open cell marked `*`. Obstacles are always shown.
pub fn trace(engine: &PlayEngine) -> String {
    grid(engine.layout(), |coords| engine.is_visited(coords))
}

pub fn route(path: &[Coord2]) -> String {
    path.iter()
        .map(|(row, col)| format!("{row},{col}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn grid(layout: &PuzzleLayout, visited: impl Fn(Coord2) -> bool) -> String {
    let size = layout.size();
    let width = layout.waypoint_count().to_string().len();
    let mut out = String::new();

    for row in 0..size {
        for col in 0..size {
            if col > 0 {
                out.push(' ');
            }
            let coords = (row, col);
            let cell = match layout.kind_at(coords) {
                CellKind::Waypoint(number) => number.to_string(),
                CellKind::Obstacle => OBSTACLE.to_owned(),
                CellKind::Empty if visited(coords) => TRACED.to_owned(),
                CellKind::Empty => EMPTY.to_owned(),
            };
            out.push_str(&format!("{cell:>width$}"));
        }
        out.push('\n');
    }
    out
}
