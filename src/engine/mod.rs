//! The engine: GPU pipeline ownership, per-frame update and input
//! dispatch.

mod accessors;
mod input;

use crate::camera::controller::CameraController;
use crate::camera::viewport::Viewport;
use crate::error::WormholeError;
use crate::gpu::pipeline_helpers::HDR_FORMAT;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::input::InputProcessor;
use crate::options::Options;
use crate::renderer::postprocess::post_process::PostProcessStack;
use crate::renderer::scene_pass::ScenePass;
use crate::renderer::wireframe::WireframeRenderer;
use crate::scene::Scene;
use crate::util::frame_timing::FrameTiming;

/// Target FPS limit
const TARGET_FPS: u32 = 300;

/// The fly-through engine.
///
/// Owns the GPU context, the scene geometry, the path-following camera and
/// the render pipeline (line pass, bloom, composite). Drive it from a
/// window's redraw callback:
///
/// ```ignore
/// engine.render()?;
/// ```
pub struct WormholeEngine {
    /// Device, queue and surface.
    pub context: RenderContext,
    /// Camera follower, orbit overlay and camera uniform.
    pub camera_controller: CameraController,
    /// Wall-clock timing and FPS limiting.
    pub frame_timing: FrameTiming,
    scene: Scene,
    lines: WireframeRenderer,
    scene_pass: ScenePass,
    post_process: PostProcessStack,
    input: InputProcessor,
    options: Options,
}

impl WormholeEngine {
    /// Create the engine for a window surface of `size` physical pixels.
    ///
    /// Builds the scene from `options` and uploads all of its geometry
    /// once.
    ///
    /// # Errors
    ///
    /// Returns [`WormholeError::Gpu`] when the GPU context cannot be
    /// created and [`WormholeError::Shader`] when a shader fails to
    /// compose.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, WormholeError> {
        let context = RenderContext::new(window, size).await?;
        let mut shader_composer = ShaderComposer::new()?;

        let sample_count = context.supported_sample_count(
            HDR_FORMAT,
            options.post_processing.msaa_samples,
        );
        log::info!("scene pass: {sample_count}x MSAA");

        let scene = Scene::build(&options);
        let viewport = Viewport::new(context.width(), context.height());
        let camera_controller =
            CameraController::new(&context.device, &options, viewport);

        let lines = WireframeRenderer::new(
            &context,
            &camera_controller.layout,
            sample_count,
            &scene.line_batches(),
            &mut shader_composer,
        )?;
        let scene_pass = ScenePass::new(&context, sample_count);
        let post_process = PostProcessStack::new(
            &context,
            scene_pass.color_view(),
            &options.post_processing,
            &mut shader_composer,
        )?;

        let mut engine = Self {
            context,
            camera_controller,
            frame_timing: FrameTiming::new(TARGET_FPS),
            scene,
            lines,
            scene_pass,
            post_process,
            input: InputProcessor::new(),
            options,
        };
        engine.update_camera();
        Ok(engine)
    }

    /// Place the camera, execute the full render pipeline and present to
    /// the swapchain. Does nothing while the frame limiter holds.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain texture cannot be
    /// acquired.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if !self.frame_timing.should_render() {
            return Ok(());
        }
        self.update_camera();

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder();
        self.scene_pass.render(
            &mut encoder,
            &self.lines,
            &self.camera_controller.bind_group,
        );
        self.post_process.render(&mut encoder, view);
        self.context.submit(encoder);

        frame.present();
        self.frame_timing.end_frame();
        Ok(())
    }

    /// Handle a window resize. Zero-sized dimensions are ignored, and a
    /// repeated size leaves every target untouched.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if !self.camera_controller.resize(width, height)
            && self.scene_pass.size() == (width, height)
        {
            return;
        }
        log::debug!("resize to {width}x{height}");
        self.context.resize(width, height);
        self.scene_pass.resize(&self.context);
        self.post_process
            .resize(&self.context, self.scene_pass.color_view());
    }

    /// Reconfigure the surface at its current size after it was lost or
    /// became outdated.
    pub fn reconfigure_surface(&self) {
        self.context.reconfigure();
    }
}
