//! Puzzle page: four draggable tiles that lock onto their quadrant.

use std::cell::RefCell;
use std::rc::Rc;

use shared::assembly::{Board, DragOutcome, Viewport};
use shared::{paths, PuzzleId};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, MouseEvent};

use crate::{api, dom};

const CONTAINER_ID: &str = "puzzle-container";
const BOOKMARK_ID: &str = "bookmarkBtn";
const PIECE_CLASS: &str = "piece";

/// Piece currently under the pointer
struct ActiveDrag {
    piece_id: &'static str,
    element: Element,
    last_x: f64,
    last_y: f64,
}

struct AssemblerState {
    board: Board,
    active: Option<ActiveDrag>,
}

impl AssemblerState {
    fn begin(&mut self, piece_id: &'static str, element: Element, event: &MouseEvent) {
        let locked = self
            .board
            .piece(piece_id)
            .map(|p| p.is_locked())
            .unwrap_or(true);
        if locked {
            return;
        }
        self.active = Some(ActiveDrag {
            piece_id,
            element,
            last_x: f64::from(event.client_x()),
            last_y: f64::from(event.client_y()),
        });
    }

    fn drag(&mut self, event: &MouseEvent) -> Result<(), JsValue> {
        let Some(active) = self.active.as_mut() else {
            return Ok(());
        };

        let (x, y) = (f64::from(event.client_x()), f64::from(event.client_y()));
        let (dx, dy) = (x - active.last_x, y - active.last_y);
        active.last_x = x;
        active.last_y = y;

        let outcome = self
            .board
            .drag(active.piece_id, dx, dy)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let element = active.element.clone();
        let piece_id = active.piece_id;

        match outcome {
            DragOutcome::Moved { position, .. } => {
                set_transform(&element, position.x, position.y)?;
            }
            DragOutcome::Locked { position } => {
                set_transform(&element, position.x, position.y)?;
                dom::html(&element)?.style().set_property("border", "none")?;
                self.active = None;
                web_sys::console::log_1(
                    &format!("Piece {} locked ({}/4)", piece_id, self.board.locked_count()).into(),
                );
            }
            DragOutcome::Ignored => self.active = None,
        }
        Ok(())
    }

    fn end(&mut self) {
        self.active = None;
    }
}

fn set_transform(element: &Element, x: f64, y: f64) -> Result<(), JsValue> {
    dom::html(element)?
        .style()
        .set_property("transform", &format!("translate({}px, {}px)", x, y))
}

/// Wire up the puzzle page for the id in the query string
pub fn mount() -> Result<(), JsValue> {
    let window = dom::window()?;
    let document = dom::document()?;

    let Some(id) = paths::id_from_search(&window.location().search()?) else {
        web_sys::console::error_1(&"No puzzle id in the page URL".into());
        return Ok(());
    };

    // Bookmarking does not wait for the puzzle to be solved
    if let Some(button) = document.get_element_by_id(BOOKMARK_ID) {
        let bookmark_id = id.clone();
        dom::listen(&button, "click", move |_: MouseEvent| {
            let id = bookmark_id.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::bookmark(&id).await {
                    Ok(resp) => web_sys::console::log_1(&resp.message.into()),
                    Err(e) => web_sys::console::error_1(&e.to_string().into()),
                }
            });
        })?;
    }

    wasm_bindgen_futures::spawn_local(async move {
        dom::report(load(document, id).await);
    });
    Ok(())
}

async fn load(document: Document, id: PuzzleId) -> Result<(), JsValue> {
    match api::get_puzzle(&id).await {
        Ok(Some(doc)) => render(&document, &doc.image),
        Ok(None) => {
            web_sys::console::log_1(&format!("drawing didnt load: no puzzle {}", id).into());
            Ok(())
        }
        Err(e) => {
            web_sys::console::log_1(&format!("drawing didnt load: {}", e).into());
            Ok(())
        }
    }
}

fn render(document: &Document, image: &str) -> Result<(), JsValue> {
    let window = dom::window()?;
    let container = dom::element(document, CONTAINER_ID)?;
    container.set_inner_html("");

    let (width, height) = dom::viewport_size(&window)?;
    let board = Board::scatter(Viewport::new(width, height), js_sys::Math::random);

    let mut tiles = Vec::new();
    for piece in board.pieces() {
        let tile = document.create_element("div")?;
        tile.set_class_name(PIECE_CLASS);
        tile.set_id(piece.id());

        let style = dom::html(&tile)?.style();
        style.set_property("background-image", &format!("url({})", image))?;
        style.set_property("background-position", &piece.descriptor().background_position())?;
        style.set_property("transform", &piece.transform())?;

        container.append_child(&tile)?;
        tiles.push((piece.id(), tile));
    }

    let state = Rc::new(RefCell::new(AssemblerState {
        board,
        active: None,
    }));

    for (piece_id, tile) in tiles {
        let s = state.clone();
        let element = tile.clone();
        dom::listen(&tile, "mousedown", move |e: MouseEvent| {
            e.prevent_default();
            s.borrow_mut().begin(piece_id, element.clone(), &e);
        })?;
    }

    let s = state.clone();
    dom::listen(&window, "mousemove", move |e: MouseEvent| {
        dom::report(s.borrow_mut().drag(&e));
    })?;

    dom::listen(&window, "mouseup", move |_: MouseEvent| {
        state.borrow_mut().end();
    })?;

    Ok(())
}
