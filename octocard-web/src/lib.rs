use std::rc::Rc;

use octocard_lib::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Element, HtmlInputElement, Response};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn error(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

macro_rules! console_error {
    ($($t:tt)*) => (error(&format_args!($($t)*).to_string()))
}

mod animate;

use animate::EntranceAnimator;

struct WidgetState {
    input: HtmlInputElement,
    trigger: Element,
    display: Element,
    base_url: String,
    sequencer: RequestSequencer,
    animator: Box<dyn EntranceAnimator>,
}

/// The profile card widget. Owns references to its input field, trigger
/// control and display container; nothing is looked up ambiently after
/// attach, and only the display container is ever written to.
#[wasm_bindgen]
pub struct ProfileWidget {
    state: Rc<WidgetState>,
    _on_click: Closure<dyn FnMut(web_sys::Event)>,
    _on_keydown: Closure<dyn FnMut(web_sys::KeyboardEvent)>,
}

#[wasm_bindgen]
impl ProfileWidget {
    /// Wires the widget to its page elements: `trigger` starts a lookup on
    /// click, Enter inside `input` does the same, and `display` is fully
    /// replaced on every render.
    pub fn attach(
        input: HtmlInputElement,
        trigger: Element,
        display: Element,
        base_url: Option<String>,
    ) -> Result<ProfileWidget, JsValue> {
        let animator = animate::detect_animator(&display);
        let state = Rc::new(WidgetState {
            input,
            trigger,
            display,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            sequencer: RequestSequencer::new(),
            animator,
        });

        let on_click = {
            let state = Rc::clone(&state);
            Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
                begin_lookup(&state);
            })
        };
        state
            .trigger
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;

        let on_keydown = {
            let state = Rc::clone(&state);
            Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(
                move |event: web_sys::KeyboardEvent| {
                    if event.key() == "Enter" {
                        begin_lookup(&state);
                    }
                },
            )
        };
        state
            .input
            .add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())?;

        Ok(ProfileWidget {
            state,
            _on_click: on_click,
            _on_keydown: on_keydown,
        })
    }

    /// Programmatic trigger, equivalent to activating the control.
    pub fn lookup(&self) {
        begin_lookup(&self.state);
    }
}

fn begin_lookup(state: &Rc<WidgetState>) {
    let raw = state.input.value();
    let login = match validate_username(&raw) {
        Ok(login) => login.to_string(),
        // Validation failures never reach the network.
        Err(err) => {
            show_message(state, &err.to_string(), MessageTone::Error);
            return;
        }
    };

    let generation = state.sequencer.begin();
    show_loading(state, &login);

    let state = Rc::clone(state);
    spawn_local(async move {
        let outcome = fetch_profile(&state.base_url, &login).await;

        // A newer lookup owns the display area now; drop this response.
        if !state.sequencer.is_current(generation) {
            console_log!("Discarding stale response for {login}");
            return;
        }

        match outcome {
            Ok(record) => show_profile(&state, &record),
            Err(err) => {
                if err.kind() == LookupErrorKind::Network {
                    console_error!("Fetch error: {err}");
                }
                show_message(&state, &err.to_string(), MessageTone::Error);
            }
        }
    });
}

fn show_message(state: &WidgetState, text: &str, tone: MessageTone) {
    state.display.set_inner_html(&render_message(text, tone));
    state.animator.play(&state.display, &message_sequence());
}

fn show_loading(state: &WidgetState, login: &str) {
    state.display.set_inner_html(&render_loading(login));
    state.animator.play(&state.display, &message_sequence());
}

fn show_profile(state: &WidgetState, record: &ProfileRecord) {
    state.display.set_inner_html(&render_profile(record));
    state.animator.play(&state.display, &profile_sequence());
}

/// Single outbound lookup through the page's fetch facility; no custom
/// headers, no authentication.
async fn fetch_profile(base_url: &str, login: &str) -> Result<ProfileRecord, LookupError> {
    let window =
        web_sys::window().ok_or_else(|| LookupError::Transport("no window object".to_string()))?;

    let response = JsFuture::from(window.fetch_with_str(&lookup_url(base_url, login)))
        .await
        .map_err(|err| LookupError::Transport(js_error_message(&err)))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| LookupError::Transport("fetch returned a non-Response value".to_string()))?;

    let status = response.status();
    let status_text = response.status_text();

    // Best-effort body read; non-fatal when unavailable.
    let body = match response.text() {
        Ok(promise) => JsFuture::from(promise)
            .await
            .ok()
            .and_then(|value| value.as_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    };

    classify_status(status, &status_text, &body)?;
    parse_profile(&body)
}

fn js_error_message(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .unwrap_or_else(|| format!("{value:?}"))
}

#[wasm_bindgen(start)]
pub fn main() {
    console_log!("octocard module loaded");
}
