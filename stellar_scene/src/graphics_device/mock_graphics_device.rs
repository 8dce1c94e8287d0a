/// Mock graphics device for unit tests (no GPU required)
///
/// Records every call with the render state that was in force, so tests can
/// assert on pass ordering and per-pass state.

use glam::{Vec3, Vec4};
use rustc_hash::FxHashMap;
use crate::actor::{ActorId, LightType};
use crate::error::Result;
use crate::engine_bail;
use crate::graphics_device::{
    GraphicsDevice, DrawCall, DrawMode, Rect2D, RenderTargetId, GpuTextureId, QueryId,
    ShaderParams, RenderParams, SHADOW_MAP_SLOT,
};

/// One recorded device call
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCommand {
    SetViewport(Rect2D),
    SetRenderTarget(Option<RenderTargetId>),
    ClearDepth(f32),
    SetShaderParams(RenderParams),
    Draw {
        owner: ActorId,
        mode: DrawMode,
        render: RenderParams,
        light: Option<LightType>,
        shadow_map: Option<GpuTextureId>,
        triangles: usize,
    },
    DrawBoundingBox { min: Vec3, max: Vec3, render: RenderParams, color: Vec4 },
    DrawLines { count: usize, color: Vec4 },
    CreateQuery(QueryId),
    BeginQuery(QueryId),
    EndQuery,
    QueryResult(QueryId),
}

pub struct MockGraphicsDevice {
    pub commands: Vec<DeviceCommand>,
    pub current: ShaderParams,
    pub target: Option<RenderTargetId>,
    /// Per-query sample counts; queries not listed report `default_query_result`
    pub query_results: FxHashMap<QueryId, u32>,
    pub default_query_result: u32,
    next_query: u32,
    open_query: Option<QueryId>,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            current: ShaderParams::default(),
            target: None,
            query_results: FxHashMap::default(),
            default_query_result: 1,
            next_query: 0,
            open_query: None,
        }
    }

    /// Draw calls only, in issue order
    pub fn draws(&self) -> Vec<(ActorId, DrawMode)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DeviceCommand::Draw { owner, mode, .. } => Some((*owner, *mode)),
                _ => None,
            })
            .collect()
    }

    /// Number of draws issued by `owner` in `mode`
    pub fn draw_count(&self, owner: ActorId, mode: DrawMode) -> usize {
        self.draws().iter().filter(|(o, m)| *o == owner && *m == mode).count()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn set_viewport(&mut self, viewport: Rect2D) -> Result<()> {
        self.commands.push(DeviceCommand::SetViewport(viewport));
        Ok(())
    }

    fn render_target(&self) -> Option<RenderTargetId> {
        self.target
    }

    fn set_render_target(&mut self, target: Option<RenderTargetId>) -> Result<()> {
        self.target = target;
        self.commands.push(DeviceCommand::SetRenderTarget(target));
        Ok(())
    }

    fn clear_depth_buffer(&mut self, depth: f32) -> Result<()> {
        self.commands.push(DeviceCommand::ClearDepth(depth));
        Ok(())
    }

    fn set_shader_params(&mut self, params: &ShaderParams) -> Result<()> {
        self.current = params.clone();
        self.commands.push(DeviceCommand::SetShaderParams(params.render));
        Ok(())
    }

    fn draw(&mut self, call: &DrawCall<'_>) -> Result<()> {
        if call.indices.iter().any(|&i| (i as usize) * 3 >= call.vertices.len()) {
            engine_bail!("stellar::MockGraphicsDevice", "index out of range in draw for {:?}", call.owner);
        }
        self.commands.push(DeviceCommand::Draw {
            owner: call.owner,
            mode: call.mode,
            render: self.current.render,
            light: self.current.light.map(|l| l.light_type),
            shadow_map: self.current.textures[SHADOW_MAP_SLOT].texture,
            triangles: call.triangle_count(),
        });
        Ok(())
    }

    fn draw_bounding_box(&mut self, min: Vec3, max: Vec3) -> Result<()> {
        self.commands.push(DeviceCommand::DrawBoundingBox {
            min,
            max,
            render: self.current.render,
            color: self.current.color,
        });
        Ok(())
    }

    fn draw_lines(&mut self, vertices: &[Vec3]) -> Result<()> {
        self.commands.push(DeviceCommand::DrawLines {
            count: vertices.len(),
            color: self.current.color,
        });
        Ok(())
    }

    fn create_query(&mut self) -> Result<QueryId> {
        let id = QueryId(self.next_query);
        self.next_query += 1;
        self.commands.push(DeviceCommand::CreateQuery(id));
        Ok(id)
    }

    fn begin_query(&mut self, query: QueryId) -> Result<()> {
        if self.open_query.is_some() {
            engine_bail!("stellar::MockGraphicsDevice", "query {:?} begun while another is open", query);
        }
        self.open_query = Some(query);
        self.commands.push(DeviceCommand::BeginQuery(query));
        Ok(())
    }

    fn end_query(&mut self) -> Result<()> {
        if self.open_query.take().is_none() {
            engine_bail!("stellar::MockGraphicsDevice", "end_query without an open query");
        }
        self.commands.push(DeviceCommand::EndQuery);
        Ok(())
    }

    fn query_result(&mut self, query: QueryId) -> Result<u32> {
        self.commands.push(DeviceCommand::QueryResult(query));
        Ok(*self.query_results.get(&query).unwrap_or(&self.default_query_result))
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
