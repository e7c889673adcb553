use crate::engine::{DrawCommand, Point, Rect, Size};
use crate::game::GameState;

// offset the drawing by half a pixel for crisper lines
const CRISP_OFFSET: f64 = 0.5;
const HUD_POSITION: Point = Point { x: 10.0, y: 10.0 };

/// Full frame for `state`, back to front :
/// background -> walls -> grid lines -> block -> move counter
pub fn compose(state: &GameState, canvas: Size) -> Vec<DrawCommand> {
    let config = state.config();
    let cell = Size {
        width: config.cell_size,
        height: config.cell_size,
    };
    let grid = state.grid();
    let mut scene = vec![
        DrawCommand::FillRect {
            rect: Rect::new(Point::default(), canvas),
            colour: config.colours.background.clone(),
        },
        DrawCommand::Translate(Point {
            x: CRISP_OFFSET,
            y: CRISP_OFFSET,
        }),
    ];

    scene.extend(grid.walls().map(|wall| DrawCommand::FillRect {
        rect: Rect::new(
            Point {
                x: wall.column as f64 * config.cell_size,
                y: wall.row as f64 * config.cell_size,
            },
            cell,
        ),
        colour: config.colours.wall.clone(),
    }));

    scene.push(DrawCommand::GridLines {
        columns: grid.columns(),
        rows: grid.rows(),
        cell_size: config.cell_size,
        line_width: config.grid_line_width,
        colour: config.colours.grid.clone(),
    });
    scene.push(DrawCommand::FillRect {
        rect: Rect::new(state.block_position(), cell),
        colour: config.colours.block.clone(),
    });
    scene.push(DrawCommand::Text {
        text: format!("Moves: {}", state.moves()),
        position: HUD_POSITION,
        font: config.hud_font.clone(),
        colour: config.colours.hud.clone(),
    });
    scene.push(DrawCommand::Translate(Point {
        x: -CRISP_OFFSET,
        y: -CRISP_OFFSET,
    }));
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Direction;
    use crate::config::GameConfig;
    use crate::engine::input::InputFrame;

    fn canvas() -> Size {
        Size {
            width: 501.0,
            height: 301.0,
        }
    }

    fn fills(scene: &[DrawCommand], colour: &str) -> Vec<Rect> {
        scene
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillRect { rect, colour: c } if c == colour => Some(*rect),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn fresh_game_draws_in_order() {
        let state = GameState::new(GameConfig::default(), 5, 3);
        let scene = compose(&state, canvas());

        assert_eq!(
            scene.first(),
            Some(&DrawCommand::FillRect {
                rect: Rect::new(Point::default(), canvas()),
                colour: "#333".to_string(),
            })
        );
        assert_eq!(scene[1], DrawCommand::Translate(Point { x: 0.5, y: 0.5 }));
        assert_eq!(
            scene.last(),
            Some(&DrawCommand::Translate(Point { x: -0.5, y: -0.5 }))
        );
        assert!(scene.contains(&DrawCommand::GridLines {
            columns: 5,
            rows: 3,
            cell_size: 100.0,
            line_width: 2.0,
            colour: "#666".to_string(),
        }));
        assert!(scene.contains(&DrawCommand::Text {
            text: "Moves: 0".to_string(),
            position: Point { x: 10.0, y: 10.0 },
            font: "40px Arial".to_string(),
            colour: "white".to_string(),
        }));
    }

    #[test]
    fn walls_sit_under_the_block() {
        let state = GameState::new(GameConfig::default(), 5, 3);
        let scene = compose(&state, canvas());
        let wall_at = scene
            .iter()
            .position(|c| matches!(c, DrawCommand::FillRect { colour, .. } if colour == "#225522"))
            .unwrap();
        let block_at = scene
            .iter()
            .position(|c| matches!(c, DrawCommand::FillRect { colour, .. } if colour == "#449944"))
            .unwrap();
        assert!(wall_at < block_at);
        assert_eq!(fills(&scene, "#225522").len(), 1);
    }

    #[test]
    fn block_and_counter_follow_state() {
        let mut state = GameState::new(GameConfig::default(), 5, 3);
        let mut input = InputFrame::default();
        state.request_move(Direction::Down);
        state.update(0.0, &mut input);
        state.update(1000.0, &mut input);

        let scene = compose(&state, canvas());
        assert_eq!(
            fills(&scene, "#449944"),
            vec![Rect::new(
                Point { x: 0.0, y: 200.0 },
                Size {
                    width: 100.0,
                    height: 100.0,
                }
            )]
        );
        assert!(scene
            .iter()
            .any(|c| matches!(c, DrawCommand::Text { text, .. } if text == "Moves: 1")));
    }
}
