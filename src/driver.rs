//! Per-frame input handling shared by the renderers.
//!
//! The driver turns held-key queries into discrete actions: closing, pausing
//! the light and toggling shadows. Discrete actions fire once per physical
//! press through a [`PressLatch`]; continuous camera movement is delegated to
//! a [`CameraEventHandler`].

use std::time::Duration;

use winit::keyboard::KeyCode;

use crate::{
    input::KeyStates,
    renderer::{Animated, CameraEventHandler},
};

/// Edge detector for a key that should trigger once per press.
#[derive(Clone, Copy, Debug, Default)]
pub struct PressLatch {
    latched: bool,
}

impl PressLatch {
    /// Feed the current key state. Returns `true` only on the frame the key
    /// goes down; the latch re-arms once the key is released.
    pub fn rising_edge(&mut self, down: bool) -> bool {
        if !down {
            self.latched = false;
            return false;
        }
        if self.latched {
            return false;
        }
        self.latched = true;
        true
    }

    pub fn is_latched(&self) -> bool {
        self.latched
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
}

impl RunState {
    pub fn toggled(self) -> Self {
        match self {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
        }
    }
}

/// Keys for the discrete actions. `None` disables an action.
#[derive(Clone, Copy, Debug)]
pub struct KeyBindings {
    pub close: KeyCode,
    pub pause: Option<KeyCode>,
    pub toggle_shadows: Option<KeyCode>,
}

impl KeyBindings {
    /// Escape closes; nothing else is bound.
    pub fn viewer() -> Self {
        Self {
            close: KeyCode::Escape,
            pause: None,
            toggle_shadows: None,
        }
    }

    pub fn shadows() -> Self {
        Self {
            close: KeyCode::Escape,
            pause: Some(KeyCode::KeyP),
            toggle_shadows: Some(KeyCode::Space),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FrameDriver {
    bindings: KeyBindings,
    run_state: RunState,
    pause_latch: PressLatch,
    shadows_enabled: bool,
    shadow_latch: PressLatch,
    should_close: bool,
}

impl FrameDriver {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            run_state: RunState::Running,
            pause_latch: PressLatch::default(),
            shadows_enabled: true,
            shadow_latch: PressLatch::default(),
            should_close: false,
        }
    }

    pub fn process_input(&mut self, keys: &KeyStates, camera: &mut dyn CameraEventHandler) {
        if keys.is_down(self.bindings.close) {
            self.should_close = true;
        }

        camera.keyboard_events(keys);

        if let Some(pause) = self.bindings.pause {
            if self.pause_latch.rising_edge(keys.is_down(pause)) {
                self.run_state = self.run_state.toggled();
                log::info!("light animation {:?}", self.run_state);
            }
        }

        if let Some(toggle) = self.bindings.toggle_shadows {
            if self.shadow_latch.rising_edge(keys.is_down(toggle)) {
                self.shadows_enabled = !self.shadows_enabled;
                log::info!("shadows enabled: {}", self.shadows_enabled);
            }
        }
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn shadows_enabled(&self) -> bool {
        self.shadows_enabled
    }

    pub fn should_close(&self) -> bool {
        self.should_close
    }

    /// Tick `item` to `scene_time`, unless the animation is paused.
    pub fn step<A: Animated + ?Sized>(&self, item: &mut A, scene_time: Duration) {
        if self.is_running() {
            item.tick(scene_time);
        }
    }
}
