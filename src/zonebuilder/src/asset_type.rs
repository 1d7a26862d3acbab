//! Asset type table
//!
//! Fixed, ordered table of the 43 engine asset kinds. Each entry carries the
//! canonical type name used in zone sources and the engine's fixed record
//! size, which is only consulted by debug self-checks.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Number of asset kinds known to the engine
pub const ASSET_TYPE_COUNT: usize = 43;

/// Engine asset kind, in engine table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum AssetKind {
    PhysPreset = 0,
    PhysCollmap,
    XAnim,
    XModelSurfs,
    XModel,
    Material,
    PixelShader,
    VertexShader,
    VertexDecl,
    Techset,
    Image,
    Sound,
    SndCurve,
    LoadedSound,
    ColMapSp,
    ColMapMp,
    ComMap,
    GameMapSp,
    GameMapMp,
    MapEnts,
    FxMap,
    GfxMap,
    LightDef,
    UiMap,
    Font,
    MenuFile,
    Menu,
    Localize,
    Weapon,
    SndDriverGlobals,
    Fx,
    ImpactFx,
    AiType,
    MpType,
    Character,
    XModelAlias,
    RawFile,
    StringTable,
    LeaderboardDef,
    StructuredDataDef,
    Tracer,
    Vehicle,
    AddonMapEnts,
}

/// Asset type table entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetTypeInfo {
    pub kind: AssetKind,
    pub name: &'static str,
    /// Fixed record size in bytes (0 = not checked)
    pub size: usize,
}

macro_rules! asset_types {
    ($($kind:ident => $name:literal, $size:literal;)*) => {
        /// All asset kinds in engine order
        pub const ASSET_TYPES: &[AssetTypeInfo] = &[
            $(AssetTypeInfo { kind: AssetKind::$kind, name: $name, size: $size },)*
        ];
    };
}

asset_types! {
    PhysPreset => "physpreset", 0x2C;
    PhysCollmap => "phys_collmap", 0x48;
    XAnim => "xanim", 0x58;
    XModelSurfs => "xmodelsurfs", 0x24;
    XModel => "xmodel", 0x130;
    Material => "material", 0x60;
    PixelShader => "pixelshader", 0x10;
    VertexShader => "vertexshader", 0x10;
    VertexDecl => "vertexdecl", 0x64;
    Techset => "techset", 0xCC;
    Image => "image", 0x20;
    Sound => "sound", 0x0C;
    SndCurve => "sndcurve", 0x88;
    LoadedSound => "loaded_sound", 0x2C;
    ColMapSp => "col_map_sp", 0x100;
    ColMapMp => "col_map_mp", 0x100;
    ComMap => "com_map", 0x10;
    GameMapSp => "game_map_sp", 0x38;
    GameMapMp => "game_map_mp", 0x08;
    MapEnts => "map_ents", 0x2C;
    FxMap => "fx_map", 0x74;
    GfxMap => "gfx_map", 0x274;
    LightDef => "lightdef", 0x10;
    UiMap => "ui_map", 0;
    Font => "font", 0x18;
    MenuFile => "menufile", 0x0C;
    Menu => "menu", 0x190;
    Localize => "localize", 0x08;
    Weapon => "weapon", 0x684;
    SndDriverGlobals => "snddriverglobals", 0x04;
    Fx => "fx", 0x20;
    ImpactFx => "impactfx", 0x08;
    AiType => "aitype", 0;
    MpType => "mptype", 0;
    Character => "character", 0;
    XModelAlias => "xmodelalias", 0;
    RawFile => "rawfile", 0x10;
    StringTable => "stringtable", 0x10;
    LeaderboardDef => "leaderboarddef", 0x18;
    StructuredDataDef => "structureddatadef", 0x0C;
    Tracer => "tracer", 0x70;
    Vehicle => "vehicle", 0x2E0;
    AddonMapEnts => "addon_map_ents", 0x20;
}

impl AssetKind {
    /// Engine table index
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a kind by engine table index
    pub fn from_index(index: usize) -> Option<Self> {
        ASSET_TYPES.get(index).map(|info| info.kind)
    }

    /// Table entry for this kind
    pub fn info(self) -> &'static AssetTypeInfo {
        &ASSET_TYPES[self.index()]
    }

    /// Kinds whose records embed live pointers into the loading process.
    ///
    /// These can only be exported from resident (built-in) objects, never
    /// from bytes read back from outside the process.
    pub fn requires_resident(self) -> bool {
        matches!(self, AssetKind::Tracer)
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(name_from_kind(*self))
    }
}

impl FromStr for AssetKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        kind_from_name(s).ok_or_else(|| Error::UnknownAssetType(s.to_string()))
    }
}

/// Look up an asset kind by its type name (exact, case-sensitive)
pub fn kind_from_name(name: &str) -> Option<AssetKind> {
    ASSET_TYPES
        .iter()
        .find(|info| info.name == name)
        .map(|info| info.kind)
}

/// Name lookup with the engine tool's historical scan bound.
///
/// Scans from the last entry down to index 1, so `physpreset` (index 0) is
/// never found. Kept only to document that behavior; use [`kind_from_name`].
pub fn kind_from_name_legacy(name: &str) -> Option<AssetKind> {
    (1..ASSET_TYPE_COUNT)
        .rev()
        .find(|&i| ASSET_TYPES[i].name == name)
        .map(|i| ASSET_TYPES[i].kind)
}

/// Type name for an asset kind
pub fn name_from_kind(kind: AssetKind) -> &'static str {
    kind.info().name
}

/// Expected fixed record size for an asset kind (0 = not checked)
pub fn expected_size_from_kind(kind: AssetKind) -> usize {
    kind.info().size
}

/// Compare an encoded record header against the engine's expected size.
///
/// A mismatch means the encoder and the engine layout have drifted.
pub fn check_record_size(kind: AssetKind, actual: usize) -> Result<()> {
    let expected = expected_size_from_kind(kind);
    if expected != 0 && expected != actual {
        return Err(Error::TypeMismatch {
            kind,
            expected,
            actual,
        });
    }
    Ok(())
}
