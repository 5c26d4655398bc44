use quartz_nbt::NbtCompound;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;
use std::hash::{Hash, Hasher};

pub const AIR: &str = "minecraft:air";

/// A block type plus its property list, e.g. `minecraft:chest[facing=north]`.
///
/// Properties print in insertion order but compare and hash as a set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockState {
    pub name: SmolStr,
    pub properties: Vec<(SmolStr, SmolStr)>,
}

impl fmt::Display for BlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.properties.is_empty() {
            write!(f, "[")?;
            for (i, (key, value)) in self.properties.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}={}", key, value)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

impl PartialEq for BlockState {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.properties.len() == other.properties.len()
            && self
                .properties
                .iter()
                .all(|(k, v)| other.get_property(k) == Some(v))
    }
}

impl Eq for BlockState {}

impl Hash for BlockState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        let mut properties: Vec<_> = self.properties.iter().collect();
        properties.sort_unstable();
        properties.hash(state);
    }
}

impl BlockState {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        BlockState {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    pub fn air() -> Self {
        BlockState::new(AIR)
    }

    /// Parses the `name[key=value,...]` form produced by `Display`.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let Some(open) = input.find('[') else {
            return (!input.is_empty()).then(|| BlockState::new(input));
        };
        let body = input[open + 1..].strip_suffix(']')?;
        let mut state = BlockState::new(&input[..open]);
        for pair in body.split(',').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=')?;
            state.set_property(key.trim(), value.trim());
        }
        Some(state)
    }

    pub fn get_name(&self) -> &str {
        self.name.as_str()
    }

    pub fn is_air(&self) -> bool {
        matches!(
            self.name.as_str(),
            AIR | "minecraft:cave_air" | "minecraft:void_air"
        )
    }

    pub fn with_property(mut self, key: impl Into<SmolStr>, value: impl Into<SmolStr>) -> Self {
        self.set_property(key, value);
        self
    }

    pub fn set_property(&mut self, key: impl Into<SmolStr>, value: impl Into<SmolStr>) {
        let key = key.into();
        let value = value.into();
        for (k, v) in &mut self.properties {
            if *k == key {
                *v = value;
                return;
            }
        }
        self.properties.push((key, value));
    }

    pub fn get_property(&self, key: &str) -> Option<&SmolStr> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn has_property(&self, key: &str) -> bool {
        self.get_property(key).is_some()
    }

    /// Same type, different properties allowed.
    pub fn same_type(&self, other: &BlockState) -> bool {
        self.name == other.name
    }
}

impl From<&str> for BlockState {
    fn from(name: &str) -> Self {
        BlockState::parse(name).unwrap_or_else(|| BlockState::new(name))
    }
}

/// A block state with optional tile entity data.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseBlock {
    pub state: BlockState,
    pub nbt: Option<NbtCompound>,
}

impl BaseBlock {
    pub fn new(state: BlockState) -> Self {
        BaseBlock { state, nbt: None }
    }

    pub fn with_nbt(state: BlockState, nbt: NbtCompound) -> Self {
        BaseBlock {
            state,
            nbt: Some(nbt),
        }
    }

    pub fn air() -> Self {
        BaseBlock::new(BlockState::air())
    }

    pub fn has_nbt(&self) -> bool {
        self.nbt.is_some()
    }

    pub fn into_state(self) -> BlockState {
        self.state
    }
}

impl From<BlockState> for BaseBlock {
    fn from(state: BlockState) -> Self {
        BaseBlock::new(state)
    }
}

impl From<&str> for BaseBlock {
    fn from(name: &str) -> Self {
        BaseBlock::new(BlockState::from(name))
    }
}

impl fmt::Display for BaseBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.state)?;
        if self.nbt.is_some() {
            write!(f, "{{..}}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BiomeType(pub SmolStr);

impl BiomeType {
    pub fn new(id: impl Into<SmolStr>) -> Self {
        BiomeType(id.into())
    }

    pub fn plains() -> Self {
        BiomeType::new("minecraft:plains")
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl Default for BiomeType {
    fn default() -> Self {
        BiomeType::plains()
    }
}
