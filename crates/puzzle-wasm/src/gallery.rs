//! Home page: bookmark gallery, puzzle count and server status.

use shared::{bookmarked, paths, PuzzleDocument, PuzzleId};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, MouseEvent};

use crate::{api, dom};

const LIST_ID: &str = "bookmark-list";
const COUNT_ID: &str = "puzzle-count";
const STATUS_ID: &str = "server-message";

pub fn mount() -> Result<(), JsValue> {
    let document = dom::document()?;

    let doc = document.clone();
    wasm_bindgen_futures::spawn_local(async move {
        match api::list_puzzles().await {
            Ok(puzzles) => dom::report(render_gallery(&doc, &puzzles)),
            Err(e) => web_sys::console::error_1(&e.to_string().into()),
        }
    });

    let doc = document.clone();
    wasm_bindgen_futures::spawn_local(async move {
        match api::stats().await {
            Ok(stats) => {
                if let Some(count) = doc.get_element_by_id(COUNT_ID) {
                    count.set_text_content(Some(&stats.total_puzzles.to_string()));
                }
            }
            Err(e) => web_sys::console::error_1(&e.to_string().into()),
        }
    });

    wasm_bindgen_futures::spawn_local(async move {
        match api::connected().await {
            Ok(message) => dom::report(show_status(&document, &message)),
            Err(e) => web_sys::console::error_1(&e.to_string().into()),
        }
    });

    Ok(())
}

fn show_status(document: &Document, message: &str) -> Result<(), JsValue> {
    let status = dom::element(document, STATUS_ID)?;
    status.set_text_content(Some(message));
    dom::html(&status)?.style().set_property("color", "green")
}

fn render_gallery(document: &Document, puzzles: &[PuzzleDocument]) -> Result<(), JsValue> {
    let list = dom::element(document, LIST_ID)?;
    list.set_inner_html("");

    for puzzle in bookmarked(puzzles) {
        let item: Element = card(document, puzzle)?;
        list.append_child(&item)?;
    }
    Ok(())
}

fn card(document: &Document, puzzle: &PuzzleDocument) -> Result<Element, JsValue> {
    let item = document.create_element("div")?;
    item.set_class_name("p-2 border bg-white shadow-sm");
    dom::html(&item)?.style().set_property("width", "150px")?;

    let img = document.create_element("img")?;
    img.set_attribute("src", &puzzle.image)?;
    img.set_attribute("style", "width:100%")?;
    item.append_child(&img)?;

    let title = document.create_element("p")?;
    title.set_class_name("small mb-1");
    title.set_text_content(Some(&puzzle.title));
    item.append_child(&title)?;

    let play = button(document, "btn btn-sm btn-primary", "Play")?;
    let id = puzzle.id.clone();
    dom::listen(&play, "click", move |_: MouseEvent| {
        dom::report(go_to_puzzle(&id));
    })?;
    item.append_child(&play)?;

    let remove = button(document, "btn btn-sm btn-danger", "Remove")?;
    let id = puzzle.id.clone();
    dom::listen(&remove, "click", move |_: MouseEvent| {
        dom::report(remove_bookmark(id.clone()));
    })?;
    item.append_child(&remove)?;

    Ok(item)
}

fn button(document: &Document, class: &str, label: &str) -> Result<Element, JsValue> {
    let button = document.create_element("button")?;
    button.set_class_name(class);
    button.set_text_content(Some(label));
    Ok(button)
}

fn go_to_puzzle(id: &PuzzleId) -> Result<(), JsValue> {
    dom::window()?.location().set_href(&paths::puzzle_page(id))
}

fn remove_bookmark(id: PuzzleId) -> Result<(), JsValue> {
    let window = dom::window()?;
    if !window.confirm_with_message("Do you want to delete this bookmark?")? {
        return Ok(());
    }

    wasm_bindgen_futures::spawn_local(async move {
        match api::delete_puzzle(&id).await {
            Ok(resp) => web_sys::console::log_1(&format!("{} ({})", resp.message, resp.count).into()),
            Err(e) => web_sys::console::error_1(&e.to_string().into()),
        }
        dom::report(window.location().reload());
    });
    Ok(())
}
