//! Static block tables: what a mined block drops, what may stand in for a
//! missing block, which blocks are never placed from an inventory, and the
//! set of block types a world accepts.

use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use std::sync::OnceLock;

const VANILLA_BLOCKS: &[&str] = &[
    "minecraft:air",
    "minecraft:cave_air",
    "minecraft:void_air",
    "minecraft:stone",
    "minecraft:granite",
    "minecraft:diorite",
    "minecraft:andesite",
    "minecraft:deepslate",
    "minecraft:cobblestone",
    "minecraft:mossy_cobblestone",
    "minecraft:grass_block",
    "minecraft:dirt",
    "minecraft:coarse_dirt",
    "minecraft:mycelium",
    "minecraft:podzol",
    "minecraft:farmland",
    "minecraft:sand",
    "minecraft:red_sand",
    "minecraft:gravel",
    "minecraft:clay",
    "minecraft:sandstone",
    "minecraft:bedrock",
    "minecraft:water",
    "minecraft:lava",
    "minecraft:oak_log",
    "minecraft:spruce_log",
    "minecraft:birch_log",
    "minecraft:oak_planks",
    "minecraft:spruce_planks",
    "minecraft:birch_planks",
    "minecraft:oak_leaves",
    "minecraft:oak_stairs",
    "minecraft:stone_stairs",
    "minecraft:cobblestone_stairs",
    "minecraft:stone_brick_stairs",
    "minecraft:oak_slab",
    "minecraft:stone_slab",
    "minecraft:oak_fence",
    "minecraft:oak_fence_gate",
    "minecraft:oak_door",
    "minecraft:oak_trapdoor",
    "minecraft:glass",
    "minecraft:glass_pane",
    "minecraft:iron_bars",
    "minecraft:bricks",
    "minecraft:stone_bricks",
    "minecraft:white_wool",
    "minecraft:red_wool",
    "minecraft:blue_wool",
    "minecraft:white_concrete",
    "minecraft:chest",
    "minecraft:trapped_chest",
    "minecraft:ender_chest",
    "minecraft:furnace",
    "minecraft:lit_furnace",
    "minecraft:crafting_table",
    "minecraft:ladder",
    "minecraft:lever",
    "minecraft:torch",
    "minecraft:wall_torch",
    "minecraft:redstone_torch",
    "minecraft:unlit_redstone_torch",
    "minecraft:redstone_wall_torch",
    "minecraft:redstone_wire",
    "minecraft:redstone_block",
    "minecraft:repeater",
    "minecraft:comparator",
    "minecraft:piston",
    "minecraft:sticky_piston",
    "minecraft:observer",
    "minecraft:dispenser",
    "minecraft:dropper",
    "minecraft:hopper",
    "minecraft:rail",
    "minecraft:powered_rail",
    "minecraft:oak_sign",
    "minecraft:oak_wall_sign",
    "minecraft:white_banner",
    "minecraft:coal_ore",
    "minecraft:iron_ore",
    "minecraft:gold_ore",
    "minecraft:diamond_ore",
    "minecraft:emerald_ore",
    "minecraft:lapis_ore",
    "minecraft:redstone_ore",
    "minecraft:nether_quartz_ore",
    "minecraft:copper_ore",
    "minecraft:diamond_block",
    "minecraft:gold_block",
    "minecraft:iron_block",
    "minecraft:spawner",
    "minecraft:wheat",
    "minecraft:carrots",
    "minecraft:potatoes",
    "minecraft:beetroots",
    "minecraft:snow",
    "minecraft:snow_block",
    "minecraft:ice",
    "minecraft:nether_portal",
    "minecraft:end_portal",
    "minecraft:end_portal_frame",
    "minecraft:netherrack",
    "minecraft:glowstone",
    "minecraft:pumpkin",
    "minecraft:jack_o_lantern",
    "minecraft:quartz_block",
    "minecraft:quartz_pillar",
];

/// Block types a world accepts. An unrestricted registry accepts any name.
#[derive(Debug, Clone, Default)]
pub struct BlockRegistry {
    known: Option<FxHashSet<SmolStr>>,
}

impl BlockRegistry {
    pub fn unrestricted() -> Self {
        BlockRegistry { known: None }
    }

    pub fn vanilla() -> Self {
        static VANILLA: OnceLock<FxHashSet<SmolStr>> = OnceLock::new();
        let known = VANILLA
            .get_or_init(|| VANILLA_BLOCKS.iter().map(|n| SmolStr::new(n)).collect())
            .clone();
        BlockRegistry { known: Some(known) }
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        BlockRegistry {
            known: Some(names.into_iter().map(Into::into).collect()),
        }
    }

    pub fn with_block(mut self, name: impl Into<SmolStr>) -> Self {
        if let Some(known) = &mut self.known {
            known.insert(name.into());
        }
        self
    }

    pub fn is_registered(&self, name: &str) -> bool {
        match &self.known {
            Some(known) => known.contains(name),
            None => true,
        }
    }
}

/// What happens when a block is mined into an inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drop {
    Item(&'static str),
    Nothing,
}

fn drop_table() -> &'static FxHashMap<&'static str, Drop> {
    static TABLE: OnceLock<FxHashMap<&'static str, Drop>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut t = FxHashMap::default();
        for air in ["minecraft:air", "minecraft:cave_air", "minecraft:void_air"] {
            t.insert(air, Drop::Nothing);
        }
        for (mined, dropped) in [
            ("minecraft:stone", "minecraft:cobblestone"),
            ("minecraft:grass_block", "minecraft:dirt"),
            ("minecraft:mycelium", "minecraft:dirt"),
            ("minecraft:podzol", "minecraft:dirt"),
            ("minecraft:farmland", "minecraft:dirt"),
            ("minecraft:lit_furnace", "minecraft:furnace"),
            ("minecraft:unlit_redstone_torch", "minecraft:redstone_torch"),
            ("minecraft:redstone_wall_torch", "minecraft:redstone_torch"),
            ("minecraft:wall_torch", "minecraft:torch"),
            ("minecraft:oak_wall_sign", "minecraft:oak_sign"),
            ("minecraft:redstone_ore", "minecraft:redstone_wire"),
            ("minecraft:diamond_ore", "minecraft:diamond"),
            ("minecraft:emerald_ore", "minecraft:emerald"),
            ("minecraft:coal_ore", "minecraft:coal"),
            ("minecraft:nether_quartz_ore", "minecraft:quartz"),
            ("minecraft:wheat", "minecraft:wheat_seeds"),
            ("minecraft:carrots", "minecraft:carrot"),
            ("minecraft:potatoes", "minecraft:potato"),
            ("minecraft:beetroots", "minecraft:beetroot_seeds"),
            ("minecraft:quartz_pillar", "minecraft:quartz_block"),
        ] {
            t.insert(mined, Drop::Item(dropped));
        }
        for kept in [
            "minecraft:bedrock",
            "minecraft:spawner",
            "minecraft:nether_portal",
            "minecraft:end_portal",
            "minecraft:end_portal_frame",
            "minecraft:water",
            "minecraft:lava",
            "minecraft:ice",
        ] {
            t.insert(kept, Drop::Nothing);
        }
        t
    })
}

/// The item a mined block yields, or `None` when it yields nothing.
/// Blocks without an entry drop themselves.
pub fn dropped_block(name: &str) -> Option<SmolStr> {
    match drop_table().get(name) {
        Some(Drop::Item(item)) => Some(SmolStr::new(item)),
        Some(Drop::Nothing) => None,
        None => Some(SmolStr::new(name)),
    }
}

/// Item that may be spent in place of `name` when the exact block is missing.
pub fn substitute_block(name: &str) -> Option<&'static str> {
    static TABLE: OnceLock<FxHashMap<&'static str, &'static str>> = OnceLock::new();
    TABLE
        .get_or_init(|| {
            [
                ("minecraft:stone", "minecraft:cobblestone"),
                ("minecraft:grass_block", "minecraft:dirt"),
                ("minecraft:redstone_wire", "minecraft:redstone"),
                ("minecraft:lit_furnace", "minecraft:furnace"),
                ("minecraft:unlit_redstone_torch", "minecraft:redstone_torch"),
                ("minecraft:oak_wall_sign", "minecraft:oak_sign"),
                ("minecraft:wall_sign", "minecraft:oak_sign"),
            ]
            .into_iter()
            .collect()
        })
        .get(name)
        .copied()
}

/// Blocks that are never taken from an inventory, whatever it holds.
pub fn is_unplaceable(name: &str) -> bool {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        [
            "minecraft:bedrock",
            "minecraft:spawner",
            "minecraft:coal_ore",
            "minecraft:iron_ore",
            "minecraft:gold_ore",
            "minecraft:diamond_ore",
            "minecraft:emerald_ore",
            "minecraft:lapis_ore",
            "minecraft:redstone_ore",
            "minecraft:nether_quartz_ore",
            "minecraft:copper_ore",
            "minecraft:wheat",
            "minecraft:carrots",
            "minecraft:potatoes",
            "minecraft:beetroots",
            "minecraft:snow",
            "minecraft:nether_portal",
            "minecraft:end_portal",
        ]
        .into_iter()
        .collect()
    })
    .contains(name)
}

/// Water and lava are placed without consuming anything.
pub fn is_liquid(name: &str) -> bool {
    matches!(
        name,
        "minecraft:water" | "minecraft:lava" | "minecraft:flowing_water" | "minecraft:flowing_lava"
    )
}
