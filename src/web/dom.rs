//! DOM side of the game: the menu controls and the card board.
//!
//! Expected page skeleton (ids are fixed):
//! `#game` board, `#categories` checkbox container, `#size` grid-mode select
//! (`auto|easy|medium|hard|custom|<cols>x<rows>`), `#cols`/`#rows` inputs for custom,
//! `#back` select, `#kids` and `#sound` checkboxes.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, HtmlInputElement, HtmlSelectElement, window};

use crate::catalog::{CardCatalog, escape_html};
use crate::config::GameOptions;
use crate::deck::{Card, CardId, CardState, Face};
use crate::error::GameError;
use crate::grid::{GridMode, GridSpec};
use crate::render::Renderer;

pub const BOARD_ID: &str = "game";
pub const CATEGORIES_ID: &str = "categories";
pub const SIZE_ID: &str = "size";
pub const COLS_ID: &str = "cols";
pub const ROWS_ID: &str = "rows";
pub const BACK_ID: &str = "back";
pub const KIDS_ID: &str = "kids";
pub const SOUND_ID: &str = "sound";

const OPEN: &str = "open";
const MATCHED: &str = "matched";

pub fn alert(message: &str) {
    if let Some(win) = window() {
        if win.alert_with_message(message).is_err() {
            log::warn!("alert failed: {message}");
        }
    }
}

fn warn_on_err(what: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        log::warn!("{what} failed: {err:?}");
    }
}

fn element<T: JsCast>(doc: &Document, id: &str) -> Option<T> {
    doc.get_element_by_id(id).and_then(|el| el.dyn_into::<T>().ok())
}

pub fn checkbox(doc: &Document, id: &str) -> Option<bool> {
    element::<HtmlInputElement>(doc, id).map(|input| input.checked())
}

fn number_input(doc: &Document, id: &str) -> Result<u32, GameError> {
    let value = element::<HtmlInputElement>(doc, id)
        .map(|input| input.value())
        .ok_or_else(|| GameError::Dom(format!("missing #{id}")))?;
    value
        .trim()
        .parse()
        .map_err(|_| GameError::InvalidGridMode(format!("{id}={value}")))
}

/// Collect the menu selection.
pub fn read_options(doc: &Document) -> Result<GameOptions, GameError> {
    let mut categories = Vec::new();
    let checked = doc.query_selector_all(&format!("#{CATEGORIES_ID} .category:checked"))?;
    for i in 0..checked.length() {
        if let Some(input) = checked.item(i).and_then(|n| n.dyn_into::<HtmlInputElement>().ok()) {
            categories.push(input.value());
        }
    }

    let size = element::<HtmlSelectElement>(doc, SIZE_ID)
        .map(|select| select.value())
        .unwrap_or_else(|| "auto".to_string());
    let mode = if size.trim().eq_ignore_ascii_case("custom") {
        GridMode::Custom {
            columns: number_input(doc, COLS_ID)?,
            rows: number_input(doc, ROWS_ID)?,
        }
    } else {
        size.parse()?
    };

    let back = element::<HtmlSelectElement>(doc, BACK_ID)
        .map(|select| select.value())
        .filter(|value| !value.is_empty());

    Ok(GameOptions {
        categories,
        mode,
        back,
        kids_mode: checkbox(doc, KIDS_ID).unwrap_or(false),
    })
}

/// Fill the category checkboxes (all checked) and the back selector.
pub fn build_menu(doc: &Document, catalog: &CardCatalog) -> Result<(), GameError> {
    if let Some(container) = doc.get_element_by_id(CATEGORIES_ID) {
        let html: String = catalog
            .category_names()
            .map(|name| {
                let safe = escape_html(name);
                format!(
                    "<label class=\"category-label\"><input type=\"checkbox\" class=\"category\" value=\"{safe}\" checked> {safe}</label>"
                )
            })
            .collect();
        if html.is_empty() {
            container.set_inner_html("<p class=\"error\">No categories available</p>");
        } else {
            container.set_inner_html(&html);
        }
    }

    if let Some(select) = doc.get_element_by_id(BACK_ID) {
        select.set_inner_html("");
        for back in catalog.backs() {
            let option = doc.create_element("option")?;
            option.set_attribute("value", back)?;
            option.set_text_content(Some(back.as_str()));
            select.append_child(&option)?;
        }
    }
    Ok(())
}

pub struct DomRenderer {
    document: Document,
    board: HtmlElement,
    cards: Vec<Element>,
    listeners: Vec<Closure<dyn FnMut(web_sys::MouseEvent)>>,
}

impl DomRenderer {
    pub fn new(doc: &Document) -> Result<Self, GameError> {
        let board = element::<HtmlElement>(doc, BOARD_ID)
            .ok_or_else(|| GameError::Dom(format!("game board #{BOARD_ID} not found")))?;
        Ok(Self {
            document: doc.clone(),
            board,
            cards: Vec::new(),
            listeners: Vec::new(),
        })
    }

    fn div(&self, class: &str) -> Result<Element, JsValue> {
        let el = self.document.create_element("div")?;
        el.set_class_name(class);
        Ok(el)
    }

    fn image(&self, src: &str, alt: &str) -> Result<HtmlImageElement, JsValue> {
        let img: HtmlImageElement = self.document.create_element("img")?.dyn_into()?;
        img.set_src(src);
        img.set_alt(alt);
        img.set_attribute("loading", "lazy")?;
        Ok(img)
    }

    // .card > .inner > (.face > img, .back > img)
    fn build_card(&self, card: &Card, back_image: &str) -> Result<Element, JsValue> {
        let root = self.div("card")?;
        root.set_attribute("data-id", &card.pair_id)?;
        root.set_attribute("data-name", &card.name)?;
        let pair_type = match card.face {
            Face::A => "A",
            Face::B => "B",
        };
        root.set_attribute("data-pair-type", pair_type)?;

        let inner = self.div("inner")?;
        let face = self.div("face")?;
        let face_img = self.image(&card.image, &card.alt_text())?;
        face.append_child(&face_img)?;
        let back = self.div("back")?;
        let back_img = self.image(back_image, "Card back")?;
        back.append_child(&back_img)?;
        inner.append_child(&face)?;
        inner.append_child(&back)?;
        root.append_child(&inner)?;
        Ok(root)
    }

    fn apply_state(el: &Element, state: CardState) -> Result<(), JsValue> {
        let classes = el.class_list();
        match state {
            CardState::FaceDown => classes.remove_2(OPEN, MATCHED),
            CardState::FaceUp => classes.add_1(OPEN),
            CardState::Matched => classes.add_2(OPEN, MATCHED),
        }
    }
}

impl Renderer for DomRenderer {
    fn clear_board(&mut self) {
        self.board.set_inner_html("");
        self.cards.clear();
        self.listeners.clear();
    }

    fn layout_grid(&mut self, grid: &GridSpec, card_px: f64) {
        let style = self.board.style();
        warn_on_err(
            "grid columns",
            style.set_property("grid-template-columns", &format!("repeat({}, 1fr)", grid.columns)),
        );
        warn_on_err(
            "grid rows",
            style.set_property("grid-template-rows", &format!("repeat({}, 1fr)", grid.rows)),
        );
        self.set_card_size(card_px);
    }

    fn set_card_size(&mut self, card_px: f64) {
        let Some(root) = self
            .document
            .document_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        warn_on_err(
            "card size",
            root.style().set_property("--card-size", &format!("{card_px:.0}px")),
        );
    }

    fn render_card(&mut self, id: CardId, card: &Card, back_image: &str) {
        let el = match self.build_card(card, back_image) {
            Ok(el) => el,
            Err(err) => {
                log::warn!("card {id} not rendered: {err:?}");
                return;
            }
        };
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            super::on_card_click(id);
        }) as Box<dyn FnMut(_)>);
        warn_on_err(
            "card listener",
            el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref()),
        );
        warn_on_err("card append", self.board.append_child(&el).map(|_| ()));
        self.listeners.push(closure);
        // Cards arrive in display order, so the vector index is the card id.
        self.cards.push(el);
    }

    fn set_card_state(&mut self, id: CardId, state: CardState) {
        if let Some(el) = self.cards.get(id) {
            warn_on_err("card state", Self::apply_state(el, state));
        }
    }

    fn reveal_all(&mut self) {
        for el in &self.cards {
            warn_on_err("reveal", el.class_list().add_1(OPEN));
        }
    }

    fn conceal_all(&mut self, states: &[CardState]) {
        for (el, state) in self.cards.iter().zip(states) {
            warn_on_err("conceal", Self::apply_state(el, *state));
        }
    }

    fn announce_win(&mut self, total_pairs: usize, turn_count: u32) {
        alert(&format!(
            "🎉 You won! All {total_pairs} pairs found in {turn_count} turns!"
        ));
    }
}
