//! Drawing page: freehand canvas, clear and submit.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use shared::capture::{
    DrawingSurface, Submission, SurfaceRect, STROKE_STYLE, SURFACE_HEIGHT, SURFACE_WIDTH,
};
use shared::{paths, Point2D};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlInputElement, MouseEvent};

use crate::{api, dom};

const CANVAS_ID: &str = "Canvas";
const TITLE_INPUT_ID: &str = "puzzleTitle";
const SUBMIT_ID: &str = "submitBtn";
const CLEAR_ID: &str = "clearBtn";

/// Canvas state owned by the page's event handlers
struct CaptureState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    surface: DrawingSurface,
}

impl CaptureState {
    fn surface_point(&self, event: &MouseEvent) -> Point2D {
        let rect = self.canvas.get_bounding_client_rect();
        SurfaceRect::new(rect.left(), rect.top())
            .to_surface(f64::from(event.client_x()), f64::from(event.client_y()))
    }

    fn pointer_down(&mut self, event: &MouseEvent) {
        let point = self.surface_point(event);
        self.surface.pointer_down(point);
        self.ctx.begin_path();
        self.ctx.move_to(point.x, point.y);
    }

    fn pointer_move(&mut self, event: &MouseEvent) {
        let point = self.surface_point(event);
        if let Some(segment) = self.surface.pointer_move(point) {
            self.ctx.begin_path();
            self.ctx.move_to(segment.from.x, segment.from.y);
            self.ctx.line_to(segment.to.x, segment.to.y);
            self.ctx.stroke();
        }
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, SURFACE_WIDTH, SURFACE_HEIGHT);
        self.surface.clear();
    }
}

/// Wire up the drawing page
pub fn mount() -> Result<(), JsValue> {
    let window = dom::window()?;
    let document = dom::document()?;

    let canvas: HtmlCanvasElement = dom::element_as(&document, CANVAS_ID)?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    ctx.set_line_width(STROKE_STYLE.width);
    ctx.set_line_cap(STROKE_STYLE.cap.as_str());
    ctx.set_stroke_style_str(STROKE_STYLE.color);

    let state = Rc::new(RefCell::new(CaptureState {
        canvas: canvas.clone(),
        ctx,
        surface: DrawingSurface::new(),
    }));

    let s = state.clone();
    dom::listen(&canvas, "mousedown", move |e: MouseEvent| {
        s.borrow_mut().pointer_down(&e);
    })?;

    let s = state.clone();
    dom::listen(&canvas, "mousemove", move |e: MouseEvent| {
        s.borrow_mut().pointer_move(&e);
    })?;

    // Released outside the canvas still ends the stroke
    let s = state.clone();
    dom::listen(&window, "mouseup", move |_: MouseEvent| {
        s.borrow_mut().surface.pointer_up();
    })?;

    let s = state.clone();
    let clear = dom::element(&document, CLEAR_ID)?;
    dom::listen(&clear, "click", move |_: MouseEvent| {
        s.borrow_mut().clear();
    })?;

    let submit = dom::element(&document, SUBMIT_ID)?;
    dom::listen(&submit, "click", move |_: MouseEvent| {
        dom::report(submit_drawing(&state.borrow().canvas));
    })?;

    Ok(())
}

fn submit_drawing(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let document = dom::document()?;
    let image = canvas.to_data_url_with_type("image/png")?;
    let title = dom::element_as::<HtmlInputElement>(&document, TITLE_INPUT_ID)
        .map(|input| input.value())
        .unwrap_or_default();
    let submission = Submission::new(Some(title.as_str()), image, Utc::now());

    wasm_bindgen_futures::spawn_local(async move {
        let result = api::create_puzzle(&submission).await;
        dom::report(after_submit(result));
    });
    Ok(())
}

fn after_submit(result: Result<shared::PuzzleDocument, api::ApiError>) -> Result<(), JsValue> {
    let window = dom::window()?;
    match result {
        Ok(doc) => {
            web_sys::console::log_1(&format!("Drawing saved with id {}", doc.id).into());
            window.location().set_href(&paths::puzzle_page(&doc.id))
        }
        Err(e) => {
            web_sys::console::error_1(&e.to_string().into());
            window.alert_with_message("failed to save to the database")
        }
    }
}
