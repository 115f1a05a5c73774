use glam::Vec2;
use wgpu::util::DeviceExt;

use super::core::CameraUniform;
use super::follower::CameraPose;
use super::rig::CameraRig;
use super::viewport::Viewport;
use crate::gpu::pipeline_helpers::uniform_buffer;
use crate::options::Options;
use crate::path::CatmullRomSpline;

/// Fog blends toward black.
const FOG_COLOR: [f32; 3] = [0.0, 0.0, 0.0];

/// Pairs the [`CameraRig`] with the camera's GPU uniform.
pub struct CameraController {
    /// Follower, orbit overlay and camera.
    pub rig: CameraRig,
    /// CPU copy of the GPU uniform.
    pub uniform: CameraUniform,
    /// GPU uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout for the camera uniform (group 0 of the line pass).
    pub layout: wgpu::BindGroupLayout,
    /// Bind group for the camera uniform.
    pub bind_group: wgpu::BindGroup,
}

impl CameraController {
    /// Create a controller for a viewport of the given size.
    pub fn new(device: &wgpu::Device, options: &Options, viewport: Viewport) -> Self {
        let rig = CameraRig::new(options, viewport);
        let mut uniform =
            CameraUniform::new(options.post_processing.fog_density, FOG_COLOR);
        uniform.update_view_proj(rig.camera());

        let buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[uniform_buffer(
                    0,
                    wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                )],
            });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("Camera Bind Group"),
        });

        Self {
            rig,
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Place the camera for `elapsed_ms` of wall-clock time, with the
    /// orbit offset applied.
    pub fn update(&mut self, spline: &CatmullRomSpline, elapsed_ms: f64) {
        self.rig.update(spline, elapsed_ms);
    }

    /// Pose from the latest [`update`](Self::update).
    pub fn pose(&self) -> Option<CameraPose> {
        self.rig.pose()
    }

    /// Upload the camera state to the GPU.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue) {
        self.uniform.update_view_proj(self.rig.camera());
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }

    /// Adopt a new viewport size. Returns whether anything changed.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        self.rig.resize(width, height)
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.rig.viewport()
    }

    /// Queue an orbit rotation from a drag of `delta` pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        self.rig.rotate(delta);
    }

    /// Queue a dolly of `steps` scroll steps.
    pub fn zoom(&mut self, steps: f32) {
        self.rig.zoom(steps);
    }
}
