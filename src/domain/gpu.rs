//! GPU kernel: runs `step.wgsl` through a wgpu compute pipeline.
//!
//! Two storage buffers (A and B) hold the cell states and two bind groups read
//! from one and write to the other. After each dispatch the roles flip, so the
//! previous output becomes the next input without leaving the device. The new
//! generation is copied to a staging buffer and read back so the host can
//! draw it.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::{GenerationBuffer, Kernel};
use crate::error::{LifeError, Result};

const WORKGROUP_SIZE: u32 = 8;
const SHADER_SOURCE: &str = include_str!("step.wgsl");
const ENTRY_POINT: &str = "step_generation";

/// Grid dimensions as seen by the shader
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct GridUniform {
    width: u32,
    height: u32,
}

pub struct GpuKernel {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: wgpu::ComputePipeline,
    // Kept alive for the bind groups
    _grid_uniform: wgpu::Buffer,
    cell_state: [wgpu::Buffer; 2],
    // bind_groups[i] reads cell_state[i] and writes cell_state[1 - i]
    bind_groups: [wgpu::BindGroup; 2],
    staging: wgpu::Buffer,
    width: u32,
    height: u32,
    byte_len: u64,
    /// Which of `cell_state` holds the current generation
    source: usize,
    /// Whether `cell_state[source]` matches the host's current buffer
    resident: bool,
}

impl GpuKernel {
    /// Acquire an adapter and device and build the pipeline for a `width x height` grid.
    ///
    /// Fails with [`LifeError::Unsupported`] when no adapter with compute
    /// support is available.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        pollster::block_on(Self::new_async(width, height))
    }

    pub async fn new_async(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(LifeError::InvalidDimensions { width, height });
        }
        let too_large = || LifeError::Unsupported(format!("a {}x{} grid exceeds device limits", width, height));
        let grid_width = u32::try_from(width).map_err(|_| too_large())?;
        let grid_height = u32::try_from(height).map_err(|_| too_large())?;
        let byte_len = (width * height * std::mem::size_of::<u32>()) as u64;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| LifeError::Unsupported(e.to_string()))?;

        let info = adapter.get_info();
        if !adapter
            .get_downlevel_capabilities()
            .flags
            .contains(wgpu::DownlevelFlags::COMPUTE_SHADERS)
        {
            return Err(LifeError::Unsupported(format!(
                "adapter {} has no compute shader support",
                info.name
            )));
        }
        log::info!("Using GPU adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Life Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| LifeError::Unsupported(e.to_string()))?;

        let limits = device.limits();
        if byte_len > u64::from(limits.max_storage_buffer_binding_size)
            || grid_width.div_ceil(WORKGROUP_SIZE) > limits.max_compute_workgroups_per_dimension
            || grid_height.div_ceil(WORKGROUP_SIZE) > limits.max_compute_workgroups_per_dimension
        {
            return Err(too_large());
        }

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Life Step Shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Life Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: false },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Life Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Life Step Pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: Some(ENTRY_POINT),
            compilation_options: Default::default(),
            cache: None,
        });

        let grid_uniform = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Life Grid Uniform"),
            contents: bytemuck::bytes_of(&GridUniform {
                width: grid_width,
                height: grid_height,
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let make_state_buffer = |label| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: byte_len,
                usage: wgpu::BufferUsages::STORAGE
                    | wgpu::BufferUsages::COPY_DST
                    | wgpu::BufferUsages::COPY_SRC,
                mapped_at_creation: false,
            })
        };
        let cell_state = [
            make_state_buffer("Life Cell State A"),
            make_state_buffer("Life Cell State B"),
        ];

        let make_bind_group = |label, input: &wgpu::Buffer, output: &wgpu::Buffer| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: grid_uniform.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: input.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: output.as_entire_binding(),
                    },
                ],
            })
        };
        let bind_groups = [
            make_bind_group("Life Bind Group A->B", &cell_state[0], &cell_state[1]),
            make_bind_group("Life Bind Group B->A", &cell_state[1], &cell_state[0]),
        ];

        let staging = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Life Staging Buffer"),
            size: byte_len,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        Ok(Self {
            device,
            queue,
            pipeline,
            _grid_uniform: grid_uniform,
            cell_state,
            bind_groups,
            staging,
            width: grid_width,
            height: grid_height,
            byte_len,
            source: 0,
            resident: false,
        })
    }

    /// Copy the staging buffer into `next`, blocking until the GPU is done
    fn read_back(&self, next: &mut GenerationBuffer) -> Result<()> {
        let slice = self.staging.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });

        self.device
            .poll(wgpu::PollType::Wait)
            .map_err(|e| LifeError::Gpu(e.to_string()))?;

        rx.recv()
            .map_err(|e| LifeError::Gpu(e.to_string()))?
            .map_err(|e| LifeError::Gpu(e.to_string()))?;

        {
            let data = slice.get_mapped_range();
            next.as_mut_slice()
                .copy_from_slice(bytemuck::cast_slice(&data));
        }
        self.staging.unmap();
        Ok(())
    }
}

impl Kernel for GpuKernel {
    fn name(&self) -> &'static str {
        "GPU"
    }

    fn advance(&mut self, current: &GenerationBuffer, next: &mut GenerationBuffer) -> Result<()> {
        assert!(
            current.has_dimensions(self.width as usize, self.height as usize),
            "buffer does not match the GPU grid"
        );

        if !self.resident {
            self.queue.write_buffer(
                &self.cell_state[self.source],
                0,
                bytemuck::cast_slice(current.as_slice()),
            );
        }
        // Cleared until the readback succeeds so a failed step re-uploads
        self.resident = false;

        let target = 1 - self.source;
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Life Step Encoder"),
            });

        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Life Step Pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.bind_groups[self.source], &[]);
            pass.dispatch_workgroups(
                self.width.div_ceil(WORKGROUP_SIZE),
                self.height.div_ceil(WORKGROUP_SIZE),
                1,
            );
        }

        encoder.copy_buffer_to_buffer(&self.cell_state[target], 0, &self.staging, 0, self.byte_len);
        self.queue.submit(std::iter::once(encoder.finish()));

        self.read_back(next)?;
        self.source = target;
        self.resident = true;
        Ok(())
    }

    fn invalidate(&mut self) {
        self.resident = false;
    }
}
