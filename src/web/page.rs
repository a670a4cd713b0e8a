//! [`Page`] implemented against the real DOM.
//!
//! `DomPage` owns the canvas element, the animation-frame closure, and the
//! installed event-listener closures. Listeners are wired through the `on*`
//! handler properties, so re-installation naturally replaces the previous
//! set. Each closure routes through the shared [`Bridge`] and then sends the
//! resulting deliveries with its own guest handle; the bridge borrow ends
//! before the guest is invoked, so guest callbacks may synchronously send
//! their next command.

#![allow(clippy::cast_precision_loss)]

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, PointerEvent, WheelEvent};

use super::guest::JsGuest;
use crate::bridge::{Bridge, Delivery};
use crate::command::WebGlVersion;
use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::page::Page;

/// The installed DOM event closures. Dropping a previous set after the `on*`
/// properties have been reassigned releases the old listeners.
struct Listeners {
    _pointer_move: Closure<dyn FnMut(PointerEvent)>,
    _mouse_move: Closure<dyn FnMut(MouseEvent)>,
    _pointer_down: Closure<dyn FnMut(PointerEvent)>,
    _pointer_up: Closure<dyn FnMut(PointerEvent)>,
    _key_down: Closure<dyn FnMut(KeyboardEvent)>,
    _key_up: Closure<dyn FnMut(KeyboardEvent)>,
    _wheel: Closure<dyn FnMut(WheelEvent)>,
}

/// Browser-side effects for one bridge instance.
pub struct DomPage {
    window: web_sys::Window,
    document: web_sys::Document,
    canvas: HtmlCanvasElement,
    core: Rc<RefCell<Bridge>>,
    guest: JsGuest,
    capture_keys: bool,
    frame_closure: Closure<dyn FnMut()>,
    listeners: Option<Listeners>,
}

impl DomPage {
    /// Bind to the configured canvas element.
    ///
    /// # Errors
    ///
    /// Returns a message when no browser window is available, the element is
    /// missing, or it is not a canvas.
    pub fn new(
        config: &BridgeConfig,
        core: Rc<RefCell<Bridge>>,
        guest: JsGuest,
    ) -> Result<Self, String> {
        let window = web_sys::window().ok_or("no global `window`")?;
        let document = window.document().ok_or("window has no document")?;
        let canvas = document
            .get_element_by_id(&config.canvas_id)
            .ok_or_else(|| format!("no element with id `{}`", config.canvas_id))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| format!("element `{}` is not a canvas", config.canvas_id))?;

        let frame_closure = {
            let core = Rc::clone(&core);
            let mut guest = guest.clone();
            let canvas = canvas.clone();
            Closure::wrap(Box::new(move || {
                sync_canvas_size(&canvas);
                let delivery = core.borrow_mut().take_frame_callback();
                if let Some(delivery) = delivery {
                    send(&mut guest, &delivery);
                }
            }) as Box<dyn FnMut()>)
        };

        Ok(Self {
            window,
            document,
            canvas,
            core,
            guest,
            capture_keys: config.capture_keys,
            frame_closure,
            listeners: None,
        })
    }
}

/// Keep the canvas backing store in step with its displayed size before a
/// frame is delivered.
fn sync_canvas_size(canvas: &HtmlCanvasElement) {
    let client_width = u32::try_from(canvas.client_width()).unwrap_or(0);
    let client_height = u32::try_from(canvas.client_height()).unwrap_or(0);
    if client_width != canvas.width() || client_height != canvas.height() {
        canvas.set_width(client_width);
        canvas.set_height(client_height);
    }
}

fn send(guest: &mut JsGuest, delivery: &Delivery) {
    if let Err(e) = delivery.send(guest) {
        log::warn!("event delivery failed: {e}");
    }
}

impl Page for DomPage {
    fn canvas_size(&self) -> (f32, f32) {
        (self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn window_size(&self) -> (f32, f32) {
        (self.canvas.client_width() as f32, self.canvas.client_height() as f32)
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.window.device_pixel_ratio() as f32
    }

    fn create_context(&mut self, version: WebGlVersion) -> Result<(), BridgeError> {
        let attributes = web_sys::WebGlContextAttributes::new();
        attributes.set_alpha(false);
        attributes.set_desynchronized(false);
        attributes.set_antialias(true);
        attributes.set_depth(true);

        let kind = match version {
            WebGlVersion::One => "webgl",
            WebGlVersion::Two => "webgl2",
        };
        let context = self
            .canvas
            .get_context_with_context_options(kind, attributes.as_ref())
            .map_err(|e| BridgeError::Page(format!("getContext({kind}) threw: {e:?}")))?
            .ok_or_else(|| BridgeError::Page(format!("{kind} context unavailable")))?;

        // The context handle stays with the canvas; the bridge only checks
        // the browser honored the requested flavor.
        let honored = match version {
            WebGlVersion::One => context.has_type::<web_sys::WebGlRenderingContext>(),
            WebGlVersion::Two => context.has_type::<web_sys::WebGl2RenderingContext>(),
        };
        if honored {
            Ok(())
        } else {
            Err(BridgeError::Page(format!("getContext({kind}) returned a different context type")))
        }
    }

    fn schedule_frame(&mut self) {
        if let Err(e) = self
            .window
            .request_animation_frame(self.frame_closure.as_ref().unchecked_ref())
        {
            log::warn!("requestAnimationFrame failed: {e:?}");
        }
    }

    fn install_forwarders(&mut self) {
        let pointer_move = {
            let core = Rc::clone(&self.core);
            let mut guest = self.guest.clone();
            Closure::wrap(Box::new(move |event: PointerEvent| {
                let delivery = core.borrow().route_pointer_move(
                    f64::from(event.client_x()),
                    f64::from(event.client_y()),
                    &event.pointer_type(),
                    event.time_stamp(),
                );
                if let Some(delivery) = delivery {
                    send(&mut guest, &delivery);
                }
            }) as Box<dyn FnMut(PointerEvent)>)
        };

        let mouse_move = {
            let core = Rc::clone(&self.core);
            let mut guest = self.guest.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                let delivery = core.borrow().route_mouse_move(
                    f64::from(event.movement_x()),
                    f64::from(event.movement_y()),
                    event.time_stamp(),
                );
                if let Some(delivery) = delivery {
                    send(&mut guest, &delivery);
                }
            }) as Box<dyn FnMut(MouseEvent)>)
        };

        let pointer_down = {
            let core = Rc::clone(&self.core);
            let mut guest = self.guest.clone();
            Closure::wrap(Box::new(move |event: PointerEvent| {
                let delivery = core.borrow().route_pointer_down(
                    f64::from(event.client_x()),
                    f64::from(event.client_y()),
                    &event.pointer_type(),
                    f64::from(event.button()),
                    event.time_stamp(),
                );
                if let Some(delivery) = delivery {
                    send(&mut guest, &delivery);
                }
            }) as Box<dyn FnMut(PointerEvent)>)
        };

        let pointer_up = {
            let core = Rc::clone(&self.core);
            let mut guest = self.guest.clone();
            Closure::wrap(Box::new(move |event: PointerEvent| {
                let delivery = core.borrow().route_pointer_up(
                    f64::from(event.client_x()),
                    f64::from(event.client_y()),
                    &event.pointer_type(),
                    f64::from(event.button()),
                    event.time_stamp(),
                );
                if let Some(delivery) = delivery {
                    send(&mut guest, &delivery);
                }
            }) as Box<dyn FnMut(PointerEvent)>)
        };

        let key_down = {
            let core = Rc::clone(&self.core);
            let mut guest = self.guest.clone();
            let capture = self.capture_keys;
            Closure::wrap(Box::new(move |event: KeyboardEvent| {
                let deliveries = core.borrow().route_key_down(
                    &event.code(),
                    &event.key(),
                    event.repeat(),
                    event.is_composing(),
                    event.time_stamp(),
                );
                for delivery in &deliveries {
                    send(&mut guest, delivery);
                }
                if capture {
                    event.prevent_default();
                }
            }) as Box<dyn FnMut(KeyboardEvent)>)
        };

        let key_up = {
            let core = Rc::clone(&self.core);
            let mut guest = self.guest.clone();
            let capture = self.capture_keys;
            Closure::wrap(Box::new(move |event: KeyboardEvent| {
                let delivery = core.borrow().route_key_up(&event.code(), event.time_stamp());
                if let Some(delivery) = delivery {
                    send(&mut guest, &delivery);
                }
                if capture {
                    event.prevent_default();
                }
            }) as Box<dyn FnMut(KeyboardEvent)>)
        };

        let wheel = {
            let core = Rc::clone(&self.core);
            let mut guest = self.guest.clone();
            Closure::wrap(Box::new(move |event: WheelEvent| {
                let delivery = core.borrow().route_wheel(
                    event.ctrl_key(),
                    event.delta_x(),
                    event.delta_y(),
                    event.time_stamp(),
                );
                if let Some(delivery) = delivery {
                    send(&mut guest, &delivery);
                }
                event.prevent_default();
            }) as Box<dyn FnMut(WheelEvent)>)
        };

        // Assigning the `on*` properties replaces any previous handler, so
        // re-installation is naturally idempotent.
        self.canvas.set_onpointermove(Some(pointer_move.as_ref().unchecked_ref()));
        self.canvas.set_onmousemove(Some(mouse_move.as_ref().unchecked_ref()));
        self.canvas.set_onpointerdown(Some(pointer_down.as_ref().unchecked_ref()));
        self.canvas.set_onpointerup(Some(pointer_up.as_ref().unchecked_ref()));
        self.document.set_onkeydown(Some(key_down.as_ref().unchecked_ref()));
        self.document.set_onkeyup(Some(key_up.as_ref().unchecked_ref()));
        self.canvas.set_onwheel(Some(wheel.as_ref().unchecked_ref()));

        self.listeners = Some(Listeners {
            _pointer_move: pointer_move,
            _mouse_move: mouse_move,
            _pointer_down: pointer_down,
            _pointer_up: pointer_up,
            _key_down: key_down,
            _key_up: key_up,
            _wheel: wheel,
        });
    }

    fn lock_cursor(&mut self) {
        self.canvas.request_pointer_lock();
    }

    fn unlock_cursor(&mut self) {
        self.document.exit_pointer_lock();
    }
}
