//! Bullet tracers
//!
//! A tracer holds a live pointer to its material, so it can only be
//! exported from a resident object. The material is taken straight from
//! that object rather than looked up in the database.

use std::sync::Arc;

use crate::asset_type::AssetKind;
use crate::assets::Material;
use crate::session::{Origin, Record, ZoneAsset, ZoneBuildSession};
use crate::stream::ZoneStream;
use crate::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct Tracer {
    pub name: String,
    pub material: Arc<Material>,
    pub draw_interval: i32,
    pub speed: f32,
    pub beam_length: f32,
    pub beam_width: f32,
    pub screw_radius: f32,
    pub screw_dist: f32,
    pub colors: [[f32; 4]; 5],
}

impl Tracer {
    pub fn new(name: &str, material: Arc<Material>) -> Self {
        Self {
            name: name.to_string(),
            material,
            draw_interval: 3,
            speed: 7500.0,
            beam_length: 160.0,
            beam_width: 4.0,
            screw_radius: 0.0,
            screw_dist: 0.0,
            colors: [[1.0; 4]; 5],
        }
    }
}

impl ZoneAsset for Tracer {
    fn kind(&self) -> AssetKind {
        AssetKind::Tracer
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn write(&self, session: &mut ZoneBuildSession<'_>) -> Result<Record> {
        let material = session.require_asset(
            AssetKind::Material,
            &self.material.name,
            Origin::Resident(self.material.as_ref()),
        )?;

        let mut header = ZoneStream::new();
        header.write_inline(); // name
        header.write_ref(material);
        header.write_i32(self.draw_interval);
        for value in [
            self.speed,
            self.beam_length,
            self.beam_width,
            self.screw_radius,
            self.screw_dist,
        ] {
            header.write_f32(value);
        }
        for component in self.colors.iter().flatten() {
            header.write_f32(*component);
        }

        Ok(Record::new(header))
    }
}
