//=========================================================================
// Desktop HID Driver
//=========================================================================
//
// Window-system input for desktop builds and development hosts.
//
// Architecture:
// ```text
//  Main thread                         Logic thread
//  ┌─────────────────────┐            ┌─────────────────────┐
//  │ winit EventLoop     │            │ DesktopHid::poll    │
//  │   ↓ WindowEvent     │  channel   │   ↓ try_recv drain  │
//  │ WindowPump ─────────┼──────────▶ │ DriverCore + touch  │
//  │   (WindowMessage)   │            │   arena             │
//  └─────────────────────┘            └─────────────────────┘
// ```
//
// Notes:
// - There is no pad hardware here; the registry is never consulted
// - The pump never blocks: a full bounded channel drops the message
// - Winit requires the event loop on the main thread (macOS/iOS)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TryRecvError, TrySendError};
use log::{debug, error, info, trace, warn};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::error::EventLoopError;
use winit::event::{Touch, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

//=== Internal Dependencies ===============================================

use crate::config::DesktopConfig;
use crate::core::touch::touch_event;
use crate::core::{
    DriverCore, GamepadRegistry, InputDriver, InputEvent, Platform, PollStage, TouchArena,
    TouchSample,
};

/// Simultaneous touches tracked on a touch-capable desktop panel.
pub const MAX_DESKTOP_TOUCHES: usize = 16;

//=== WindowMessage =======================================================

/// Window-system notification forwarded from the pump to the driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowMessage {
    Focused(bool),
    Resized { width: u32, height: u32 },
    CloseRequested,
    Touch { id: u64, phase: TouchPhase, x: f64, y: f64 },
    LowMemory,
}

impl WindowMessage {
    /// Translates the window events the driver cares about.
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::Focused(focused) => Some(Self::Focused(*focused)),
            WindowEvent::Resized(size) => Some(Self::Resized {
                width: size.width,
                height: size.height,
            }),
            WindowEvent::CloseRequested => Some(Self::CloseRequested),
            WindowEvent::Touch(Touch { id, phase, location, .. }) => Some(Self::Touch {
                id: *id,
                phase: *phase,
                x: location.x,
                y: location.y,
            }),
            _ => None,
        }
    }
}

/// Creates the pump/driver channel. A capacity of zero means unbounded.
pub fn window_channel(config: &DesktopConfig) -> (Sender<WindowMessage>, Receiver<WindowMessage>) {
    match config.channel_capacity {
        0 => unbounded(),
        capacity => bounded(capacity),
    }
}

//=== WindowPump ==========================================================

/// Winit application that owns the window and forwards its events.
pub struct WindowPump {
    config: DesktopConfig,
    window: Option<Window>,
    sender: Sender<WindowMessage>,
}

impl WindowPump {
    pub fn new(config: DesktopConfig, sender: Sender<WindowMessage>) -> Self {
        Self {
            config,
            window: None,
            sender,
        }
    }

    /// Runs the event loop until the window closes. Must be called on
    /// the main thread.
    ///
    /// # Errors
    ///
    /// Returns the winit error if the event loop cannot be created or
    /// exits abnormally.
    pub fn run(mut self) -> Result<(), EventLoopError> {
        debug!(target: "platform", "Starting window event loop");

        let event_loop = EventLoop::new()?;
        event_loop.run_app(&mut self)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends without blocking; a full or closed channel drops the message.
    fn forward(&self, message: WindowMessage) {
        match self.sender.try_send(message) {
            Ok(()) => trace!(target: "platform::input", "Forwarded {:?}", message),
            Err(TrySendError::Full(message)) => {
                warn!(target: "platform::input", "Channel full, dropping {:?}", message);
            }
            Err(TrySendError::Disconnected(message)) => {
                warn!(target: "platform::input", "Channel disconnected, dropping {:?}", message);
            }
        }
    }

    /// Forwards a window event. Returns `true` when the loop should exit.
    fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        let Some(message) = WindowMessage::from_window_event(event) else {
            return false;
        };

        self.forward(message);
        message == WindowMessage::CloseRequested
    }

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for WindowPump {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.forward(WindowMessage::CloseRequested);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if self.handle_window_event(&event) {
            info!(target: "platform", "Window close requested");
            event_loop.exit();
        }
    }

    fn memory_warning(&mut self, _event_loop: &ActiveEventLoop) {
        self.forward(WindowMessage::LowMemory);
    }
}

//=== DesktopHid ==========================================================

/// HID driver fed by a [`WindowPump`].
pub struct DesktopHid {
    core: DriverCore,
    receiver: Receiver<WindowMessage>,
    touches: TouchArena,
    /// Window-system touch id → arena slot.
    slots: HashMap<u64, usize>,
    focused: bool,
    disconnected: bool,
}

impl DesktopHid {
    pub fn new(receiver: Receiver<WindowMessage>) -> Self {
        info!(target: "platform", "Desktop HID driver attached to window channel");
        Self {
            core: DriverCore::new(),
            receiver,
            touches: TouchArena::new(MAX_DESKTOP_TOUCHES),
            slots: HashMap::new(),
            focused: true,
            disconnected: false,
        }
    }

    pub fn active_touches(&self) -> usize {
        self.touches.active_count()
    }

    fn drain_channel(&mut self) {
        loop {
            match self.receiver.try_recv() {
                Ok(message) => self.apply(message),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.disconnected {
                        warn!(target: "platform", "Window channel disconnected");
                        self.disconnected = true;
                    }
                    break;
                }
            }
        }
    }

    fn apply(&mut self, message: WindowMessage) {
        match message {
            WindowMessage::Focused(focused) => {
                if focused != self.focused {
                    self.focused = focused;
                    self.core.send_focus(focused);
                }
            }
            WindowMessage::Resized { width, height } => {
                if width == 0 || height == 0 {
                    trace!(target: "platform::system", "Ignoring {}x{} resize", width, height);
                    return;
                }
                self.core.send_resize(width, height);
            }
            WindowMessage::CloseRequested => self.core.send_quit(),
            WindowMessage::LowMemory => self.core.send_low_memory(),
            WindowMessage::Touch { id, phase, x, y } => {
                let sample = TouchSample {
                    x: x.round() as i32,
                    y: y.round() as i32,
                };
                self.apply_touch(id, phase, sample);
            }
        }
    }

    fn apply_touch(&mut self, id: u64, phase: TouchPhase, sample: TouchSample) {
        let queue = self.core.queue_mut();

        match phase {
            TouchPhase::Started => {
                let slot = match self.slots.get(&id) {
                    Some(&slot) => Some(slot),
                    None => self.touches.first_free(),
                };
                let Some(point) = slot.and_then(|slot| self.touches.press(slot, sample)) else {
                    debug!(target: "platform::input", "No free slot for touch {}", id);
                    return;
                };
                self.slots.insert(id, point.id);
                queue.enqueue(InputEvent::TouchPress(touch_event(point, 0, 0, 1.0)));
            }
            TouchPhase::Moved => {
                let Some(&slot) = self.slots.get(&id) else {
                    return;
                };
                if let Some((point, dx, dy)) = self.touches.update(slot, sample) {
                    if dx != 0 || dy != 0 {
                        queue.enqueue(InputEvent::TouchMoved(touch_event(point, dx, dy, 1.0)));
                    }
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                let Some(slot) = self.slots.remove(&id) else {
                    return;
                };
                if let Some(point) = self.touches.release(slot) {
                    queue.enqueue(InputEvent::TouchRelease(touch_event(point, 0, 0, 0.0)));
                }
            }
        }
    }
}

//=== InputDriver =========================================================

impl InputDriver for DesktopHid {
    fn poll(&mut self, _joysticks: &mut dyn GamepadRegistry) -> Option<InputEvent> {
        match self.core.begin_poll() {
            PollStage::Ready(event) => return Some(event),
            PollStage::QuietFrame => return None,
            PollStage::Refresh => {}
        }

        self.drain_channel();
        self.core.finish_poll()
    }

    fn platform(&self) -> Platform {
        Platform::Desktop
    }

    fn core(&self) -> &DriverCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut DriverCore {
        &mut self.core
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::JoystickRegistry;
    use winit::dpi::PhysicalSize;

    fn setup() -> (Sender<WindowMessage>, DesktopHid, JoystickRegistry) {
        let (tx, rx) = unbounded();
        (tx, DesktopHid::new(rx), JoystickRegistry::new())
    }

    fn frame(driver: &mut DesktopHid, joysticks: &mut JoystickRegistry) -> Vec<InputEvent> {
        std::iter::from_fn(|| driver.poll(joysticks)).collect()
    }

    fn touch(id: u64, phase: TouchPhase, x: f64, y: f64) -> WindowMessage {
        WindowMessage::Touch { id, phase, x, y }
    }

    //=====================================================================
    // Translation
    //=====================================================================

    #[test]
    fn translates_window_events() {
        assert_eq!(
            WindowMessage::from_window_event(&WindowEvent::Focused(false)),
            Some(WindowMessage::Focused(false))
        );
        assert_eq!(
            WindowMessage::from_window_event(&WindowEvent::Resized(PhysicalSize::new(640, 480))),
            Some(WindowMessage::Resized { width: 640, height: 480 })
        );
        assert_eq!(
            WindowMessage::from_window_event(&WindowEvent::CloseRequested),
            Some(WindowMessage::CloseRequested)
        );
        assert_eq!(WindowMessage::from_window_event(&WindowEvent::Destroyed), None);
    }

    #[test]
    fn channel_capacity_zero_is_unbounded() {
        let mut config = DesktopConfig::default();
        config.channel_capacity = 0;
        assert_eq!(window_channel(&config).0.capacity(), None);

        config.channel_capacity = 4;
        assert_eq!(window_channel(&config).0.capacity(), Some(4));
    }

    //=====================================================================
    // WindowPump
    //=====================================================================

    #[test]
    fn pump_forwards_and_flags_close() {
        let (tx, rx) = unbounded();
        let mut pump = WindowPump::new(DesktopConfig::default(), tx);
        assert!(pump.window().is_none());

        assert!(!pump.handle_window_event(&WindowEvent::Focused(true)));
        assert!(!pump.handle_window_event(&WindowEvent::Destroyed));
        assert!(pump.handle_window_event(&WindowEvent::CloseRequested));

        assert_eq!(rx.try_recv(), Ok(WindowMessage::Focused(true)));
        assert_eq!(rx.try_recv(), Ok(WindowMessage::CloseRequested));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn pump_drops_when_channel_full_or_closed() {
        let (tx, rx) = bounded(1);
        let pump = WindowPump::new(DesktopConfig::default(), tx);

        pump.forward(WindowMessage::LowMemory);
        pump.forward(WindowMessage::CloseRequested);
        assert_eq!(rx.try_recv(), Ok(WindowMessage::LowMemory));
        assert!(rx.try_recv().is_err());

        drop(rx);
        pump.forward(WindowMessage::LowMemory);
    }

    //=====================================================================
    // DesktopHid
    //=====================================================================

    #[test]
    fn window_messages_become_events_in_order() {
        let (tx, mut driver, mut joysticks) = setup();
        tx.send(WindowMessage::Resized { width: 800, height: 600 }).unwrap();
        tx.send(WindowMessage::Focused(false)).unwrap();
        tx.send(WindowMessage::LowMemory).unwrap();
        tx.send(WindowMessage::CloseRequested).unwrap();

        assert_eq!(
            frame(&mut driver, &mut joysticks),
            vec![
                InputEvent::WindowResized { width: 800, height: 600 },
                InputEvent::WindowFocusChanged { focused: false },
                InputEvent::LowMemory,
                InputEvent::Quit,
            ]
        );
        assert_eq!(driver.poll(&mut joysticks), None);
    }

    #[test]
    fn repeated_focus_and_empty_resize_are_dropped() {
        let (tx, mut driver, mut joysticks) = setup();
        tx.send(WindowMessage::Focused(true)).unwrap();
        tx.send(WindowMessage::Resized { width: 0, height: 0 }).unwrap();

        assert!(frame(&mut driver, &mut joysticks).is_empty());
    }

    #[test]
    fn touch_lifecycle_maps_ids_to_slots() {
        let (tx, mut driver, mut joysticks) = setup();
        tx.send(touch(77, TouchPhase::Started, 10.0, 20.0)).unwrap();
        tx.send(touch(91, TouchPhase::Started, 30.0, 40.0)).unwrap();

        let events = frame(&mut driver, &mut joysticks);
        assert!(matches!(events[0], InputEvent::TouchPress(t) if (t.id, t.x, t.y) == (0, 10.0, 20.0)));
        assert!(matches!(events[1], InputEvent::TouchPress(t) if t.id == 1));
        assert_eq!(driver.active_touches(), 2);

        tx.send(touch(91, TouchPhase::Moved, 33.0, 40.0)).unwrap();
        tx.send(touch(77, TouchPhase::Moved, 10.2, 20.0)).unwrap();
        let events = frame(&mut driver, &mut joysticks);
        assert_eq!(events.len(), 1, "Sub-pixel move rounds to zero delta");
        assert!(matches!(events[0], InputEvent::TouchMoved(t) if (t.id, t.dx, t.dy) == (1, 3.0, 0.0)));

        tx.send(touch(77, TouchPhase::Cancelled, 0.0, 0.0)).unwrap();
        let events = frame(&mut driver, &mut joysticks);
        assert!(matches!(
            events.as_slice(),
            [InputEvent::TouchRelease(t)] if (t.id, t.x, t.pressure) == (0, 10.0, 0.0)
        ));
        assert_eq!(driver.active_touches(), 1);
    }

    #[test]
    fn unknown_touch_ids_are_ignored() {
        let (tx, mut driver, mut joysticks) = setup();
        tx.send(touch(5, TouchPhase::Moved, 1.0, 1.0)).unwrap();
        tx.send(touch(5, TouchPhase::Ended, 1.0, 1.0)).unwrap();

        assert!(frame(&mut driver, &mut joysticks).is_empty());
    }

    #[test]
    fn disconnected_channel_reads_as_empty() {
        let (tx, mut driver, mut joysticks) = setup();
        tx.send(WindowMessage::CloseRequested).unwrap();
        drop(tx);

        assert_eq!(frame(&mut driver, &mut joysticks), vec![InputEvent::Quit]);
        assert_eq!(driver.poll(&mut joysticks), None);
        assert_eq!(driver.poll(&mut joysticks), None);
    }
}
