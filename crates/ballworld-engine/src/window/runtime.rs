use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, InputCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::translate_window_event;
use crate::input::{InputFrame, InputState};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "ballworld".to_string(),
            initial_size: LogicalSize::new(500.0, 500.0),
        }
    }
}

/// Requests an app callback can make of the runtime.
///
/// They are applied after the callback returns.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    redraw: bool,
    exit: bool,
}

impl RuntimeCtx {
    /// Schedules one repaint. Nothing is drawn otherwise.
    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    pub fn exit(&mut self) {
        self.exit = true;
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and blocks until the app exits or the window closes.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState { config, gpu_init, app, entry: None, startup_error: None };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.startup_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A: App + 'static> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,
    entry: Option<WindowEntry>,
    startup_error: Option<anyhow::Error>,
}

impl<A: App + 'static> AppState<A> {
    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop.create_window(attrs).context("failed to create window")?;
        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")
    }

    /// Applies the requests collected during a callback.
    fn apply(&self, event_loop: &ActiveEventLoop, ctx: RuntimeCtx, control: AppControl) {
        if ctx.exit || control == AppControl::Exit {
            log::info!("exit requested");
            event_loop.exit();
            return;
        }
        if ctx.redraw {
            if let Some(entry) = self.entry.as_ref() {
                entry.with_window(|w| w.request_redraw());
            }
        }
    }
}

impl<A: App + 'static> ApplicationHandler for AppState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        // Redraws happen only on request.
        event_loop.set_control_flow(ControlFlow::Wait);

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                log::info!("window created: {:?}", self.config.title);
                entry.with_window(|w| w.request_redraw());
                self.entry = Some(entry);
            }
            Err(err) => {
                log::error!("failed to create window: {err:#}");
                self.startup_error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        // Split borrows so the ouroboros closures do not capture `self`.
        let (app, entry) = (&mut self.app, &mut self.entry);
        let Some(entry) = entry.as_mut() else { return };
        if entry.with_window(|w| w.id()) != window_id {
            return;
        }

        let mut runtime_ctx = RuntimeCtx::default();
        let mut control = AppControl::Continue;

        match &event {
            WindowEvent::CloseRequested => {
                log::info!("window close requested");
                runtime_ctx.exit();
            }

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                runtime_ctx.request_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                runtime_ctx.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                entry.with_mut(|fields| {
                    let mut ctx = FrameCtx {
                        window: WindowCtx { window: fields.window },
                        gpu: fields.gpu,
                        input: fields.input_state,
                        runtime: &mut runtime_ctx,
                    };
                    control = app.on_frame(&mut ctx);
                });
            }

            _ => {
                entry.with_mut(|fields| {
                    let Some(ev) = translate_window_event(fields.window, fields.input_state, &event) else {
                        return;
                    };
                    fields.input_state.apply_event(fields.input_frame, ev);
                    if fields.input_frame.is_empty() {
                        return;
                    }

                    let mut ctx = InputCtx {
                        window: WindowCtx { window: fields.window },
                        input: fields.input_state,
                        frame: fields.input_frame,
                        runtime: &mut runtime_ctx,
                    };
                    control = app.on_input(&mut ctx);
                    fields.input_frame.clear();
                });
            }
        }

        self.apply(event_loop, runtime_ctx, control);
    }
}
