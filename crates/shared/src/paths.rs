//! URLs shared by the server routes and the browser client.

use crate::PuzzleId;

pub const PUZZLES: &str = "/api/puzzles";
pub const STATS: &str = "/api/stats";
pub const CONNECTED: &str = "/connectedServer";

pub const PUZZLE_PAGE: &str = "puzzle.html";

pub fn puzzle(id: &PuzzleId) -> String {
    format!("{}/{}", PUZZLES, id)
}

pub fn bookmark(id: &PuzzleId) -> String {
    format!("{}/{}/bookmark", PUZZLES, id)
}

/// Assembler page for `id`
pub fn puzzle_page(id: &PuzzleId) -> String {
    format!("{}?id={}", PUZZLE_PAGE, id)
}

/// Read the `id` parameter from a query string such as `?id=abc&x=1`
pub fn id_from_search(search: &str) -> Option<PuzzleId> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "id")
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
        .map(PuzzleId::from)
}
