use cells::{Cell, Direction};
use generators::RecursiveBacktracker;

use itertools::Itertools;

/// Plain text rendering of a carved maze as a `+---+` lattice.
///
/// Walls come straight off the bitfields: a set directional flag on a
/// visited cell is a wall on that side, a clear flag an opening. Facing
/// flags on interior neighbours always agree, so each wall is read from one
/// side only: the top boundary from the first row's UP flags, then per cell
/// its RIGHT and DOWN sides, plus the LEFT flag of each row's first cell.
/// Exit corridors carved through the border show up as gaps in the outer
/// wall.
pub fn render_text(maze: &RecursiveBacktracker) -> String {
    let grid = maze.grid();
    let w = grid.width();
    let h = grid.height();
    let mut output = String::with_capacity((4 * w + 2) * (2 * h + 1));

    for x in 1..w + 1 {
        output.push_str("+");
        if grid.cell_at(x, 1).check_any(Direction::UP.bits()) {
            output.push_str("---");
        } else {
            output.push_str("   ");
        }
    }
    output.push_str("+\n");

    for y in 1..h + 1 {
        if grid.cell_at(1, y).check_any(Direction::LEFT.bits()) {
            output.push_str("|");
        } else {
            output.push_str(" ");
        }
        for x in 1..w + 1 {
            output.push_str("   ");
            if grid.cell_at(x, y).check_any(Direction::RIGHT.bits()) {
                output.push_str("|");
            } else {
                output.push_str(" ");
            }
        }
        output.push_str("\n");

        for x in 1..w + 1 {
            output.push_str("+");
            if grid.cell_at(x, y).check_any(Direction::DOWN.bits()) {
                output.push_str("---");
            } else {
                output.push_str("   ");
            }
        }
        output.push_str("+\n");
    }

    output
}

static PAGE_HEAD: &'static str = "<!DOCTYPE html>
<html>
<head>
<meta charset=\"utf-8\">
<title>labyrinth</title>
<style>
body { background: #ffffff; }
#maze { display: inline-block; font-size: 0; }
.row { display: flex; }
.column { flex: none; }
.corner { width: 4px; height: 4px; background: #1b1b1b; }
.h-wall { width: 16px; height: 4px; }
.v-wall { width: 4px; height: 16px; }
.tile { width: 16px; height: 16px; }
.block { background: #1b1b1b; }
.wall { background: #1b1b1b; }
.path { background: #f4f4f4; }
.visited { background: #7fb069; }
</style>
</head>
<body>
";

static REPLAY_SCRIPT: &'static str = "\
var step = 0;
var timer = setInterval(function () {
    if (step >= visitOrder.length) {
        clearInterval(timer);
        return;
    }
    var cell = document.getElementById(String(visitOrder[step]));
    if (cell) {
        cell.getElementsByClassName(\"tile\")[0].className += \" visited\";
    }
    step += 1;
}, 30);
";

/// Complete standalone HTML document for a carved maze.
///
/// Every grid cell, border included, becomes a 3x3 block of divs (corners,
/// h-walls, v-walls and the tile body) classed `block`, `wall` or `path`
/// per side, and carries its linear index as the element id. The visitation
/// order is embedded as a script array and replayed by flooding the tiles
/// in discovery order.
pub fn render_html(maze: &RecursiveBacktracker) -> String {
    let grid = maze.grid();
    let mut markup = String::new();

    markup.push_str("<div id=\"maze\">");
    for y in 0..grid.height() + 2 {
        markup.push_str("<div class=\"row\">");
        for x in 0..grid.width() + 2 {
            markup.push_str(&cell_html(grid.index_of(x, y), grid.cell_at(x, y)));
        }
        markup.push_str("</div>");
    }
    markup.push_str("</div>");

    let order = maze.visit_order().iter().join(", ");

    let mut page = String::with_capacity(PAGE_HEAD.len() + markup.len() + order.len() + 512);
    page.push_str(PAGE_HEAD);
    page.push_str(&markup);
    page.push_str("\n<script>\nvar visitOrder = [");
    page.push_str(&order);
    page.push_str("];\n");
    page.push_str(REPLAY_SCRIPT);
    page.push_str("</script>\n</body>\n</html>\n");
    page
}

fn cell_html(index: usize, cell: Cell) -> String {
    let centre = if cell.check_any(Cell::BLOCK) {
        "block"
    } else {
        "path"
    };
    format!("<div id=\"{id}\">\
             <div class=\"row\">\
             <div class=\"column corner\"></div>\
             <div class=\"column h-wall {up}\"></div>\
             <div class=\"column corner\"></div>\
             </div>\
             <div class=\"row\">\
             <div class=\"column v-wall {left}\"></div>\
             <div class=\"column tile {centre}\"></div>\
             <div class=\"column v-wall {right}\"></div>\
             </div>\
             <div class=\"row\">\
             <div class=\"column corner\"></div>\
             <div class=\"column h-wall {down}\"></div>\
             <div class=\"column corner\"></div>\
             </div>\
             </div>",
            id = index,
            up = side_class(cell, Direction::UP),
            left = side_class(cell, Direction::LEFT),
            centre = centre,
            right = side_class(cell, Direction::RIGHT),
            down = side_class(cell, Direction::DOWN))
}

fn side_class(cell: Cell, side: Direction) -> &'static str {
    if cell.check_any(Cell::BLOCK) {
        "block"
    } else if cell.check_any(side.bits()) {
        "wall"
    } else {
        "path"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cells::{Cell, Direction};
    use generators::{seeded_rng, RecursiveBacktracker};
    use itertools::Itertools;
    use units::{Height, KeepChance, Width};

    fn generated(w: usize, h: usize, seed: u64, exits: bool) -> RecursiveBacktracker {
        let mut maze = RecursiveBacktracker::new(Width(w), Height(h), KeepChance(0.7))
            .expect("valid build arguments");
        let mut rng = seeded_rng(seed);
        maze.generate(&mut rng, exits);
        maze
    }

    #[test]
    fn one_by_one_text_is_a_closed_box() {
        let maze = generated(1, 1, 5, false);
        assert_eq!(render_text(&maze), "+---+\n|   |\n+---+\n");
    }

    #[test]
    fn one_by_one_text_with_exits_is_an_open_corridor() {
        let maze = generated(1, 1, 5, true);
        assert_eq!(render_text(&maze), "+---+\n     \n+---+\n");
    }

    #[test]
    fn text_has_the_lattice_shape_and_a_solid_boundary() {
        let maze = generated(6, 4, 11, false);
        let text = render_text(&maze);
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 2 * 4 + 1);
        for line in &lines {
            assert_eq!(line.len(), 4 * 6 + 1);
        }

        assert_eq!(lines[0], "+---+---+---+---+---+---+");
        assert_eq!(lines[lines.len() - 1], "+---+---+---+---+---+---+");
        for y in 0..4 {
            let body = lines[1 + 2 * y];
            assert!(body.starts_with("|"));
            assert!(body.ends_with("|"));
        }
    }

    #[test]
    fn text_exits_leave_gaps_in_the_outer_wall() {
        let maze = generated(5, 5, 11, true);
        let text = render_text(&maze);
        let lines = text.lines().collect::<Vec<_>>();

        // entrance on the first row's left, exit on the last row's right
        assert!(lines[1].starts_with(" "));
        assert!(lines[2 * 5 - 1].ends_with(" "));

        // the other boundary rows stay closed
        for y in 1..5 {
            assert!(lines[1 + 2 * y].starts_with("|"));
        }
        for y in 0..4 {
            assert!(lines[1 + 2 * y].ends_with("|"));
        }
    }

    #[test]
    fn html_document_embeds_the_grid_and_the_visit_order() {
        let maze = generated(5, 5, 7, true);
        let html = render_html(&maze);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<div id=\"maze\">"));
        assert!(html.ends_with("</html>\n"));

        // one identified tile block per grid cell, plus the maze container
        let id_count = html.matches("<div id=\"").count();
        assert_eq!(id_count, 7 * 7 + 1);

        let rendered_order = format!("var visitOrder = [{}];",
                                     maze.visit_order().iter().join(", "));
        assert!(html.contains(&rendered_order));
    }

    #[test]
    fn html_tiles_are_classed_per_side() {
        let maze = generated(5, 5, 7, true);
        let html = render_html(&maze);

        // index 0 is border padding: solid block on every side
        let block_tile = cell_html(0, Cell::with_flags(Cell::BLOCK));
        assert!(html.contains(&block_tile));

        // the carved entrance at index 7 reads as a horizontal corridor:
        // walls up and down, open left and right
        let corridor = Cell::with_flags(Direction::UP.bits() | Direction::DOWN.bits());
        let entrance_tile = cell_html(7, corridor);
        assert!(html.contains(&entrance_tile));
        assert!(entrance_tile.contains("h-wall wall"));
        assert!(entrance_tile.contains("v-wall path"));
        assert!(entrance_tile.contains("tile path"));
    }

    #[test]
    fn side_classes_read_block_then_wall_then_path() {
        let blocked = Cell::with_flags(Cell::BLOCK);
        assert_eq!(side_class(blocked, Direction::UP), "block");

        let mut cell = Cell::new();
        cell.apply(Cell::VISITED | Direction::LEFT.bits());
        assert_eq!(side_class(cell, Direction::LEFT), "wall");
        assert_eq!(side_class(cell, Direction::RIGHT), "path");
    }
}
