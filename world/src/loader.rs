//! Parsing of map and detail files into a ready-to-run [`Level`].
//!
//! Both formats are parsed into plain records first. The world is only
//! assembled once every line parsed and every placement found suitable
//! ground, so a failed load never leaves a partially built world behind.

use farm_raid_core::{Dimensions, IVec2, Inventory, RaiderSpecies, ResourceKind, SpriteError};
use thiserror::Error;
use tracing::info;

use crate::{Cabbage, Ore, StackedEntity, Tile, TileKind, World};

const COMMENT_PREFIX: &str = "//";

/// Errors raised while loading a level.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The map header could not be read as `<columns>x<rows>`.
    #[error("malformed map dimensions '{0}'")]
    MalformedDimensions(String),
    /// The number of map rows differs from the header.
    #[error("map declares {expected} rows but contains {found}")]
    RowCountMismatch {
        /// Rows declared by the header.
        expected: usize,
        /// Rows present in the file.
        found: usize,
    },
    /// A map row is shorter or longer than the header declares.
    #[error("map row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Columns declared by the header.
        expected: usize,
        /// Columns present in the row.
        found: usize,
    },
    /// A map cell uses a symbol that names no tile.
    #[error("unknown tile symbol '{symbol}' at row {row}, column {column}")]
    UnknownTileSymbol {
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        column: usize,
        /// Offending symbol.
        symbol: char,
    },
    /// A detail line could not be parsed.
    #[error("detail line {line}: {reason}")]
    MalformedDetail {
        /// One-based line number.
        line: usize,
        /// Description of the problem.
        reason: String,
    },
    /// A detail line uses a key the format does not define.
    #[error("detail line {line}: unknown key '{key}'")]
    UnknownDetailKey {
        /// One-based line number.
        line: usize,
        /// Offending key.
        key: String,
    },
    /// The detail file never declares where the player starts.
    #[error("detail file does not declare a player spawn")]
    MissingPlayerSpawn,
    /// A resource was placed on a cell without suitable ground.
    #[error("no ground accepting {resource} at column {column}, row {row}")]
    UnsupportedPlacement {
        /// Resource that could not be placed.
        resource: &'static str,
        /// Tile column of the placement.
        column: i32,
        /// Tile row of the placement.
        row: i32,
    },
    /// A detail record refers to a cell outside the map.
    #[error("{record} at column {column}, row {row} lies outside the map")]
    OutOfBounds {
        /// Kind of record holding the coordinates.
        record: &'static str,
        /// Tile column of the record.
        column: i32,
        /// Tile row of the record.
        row: i32,
    },
    /// Art required to build the level could not be resolved.
    #[error(transparent)]
    Sprite(#[from] SpriteError),
}

/// Tile variant selected by one map symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileSymbol {
    /// `.` walkable grass.
    Grass,
    /// `f` untilled farmland.
    Farmland,
    /// `~` impassable water.
    Water,
    /// `#` rocky ground.
    Rock,
}

impl TileSymbol {
    /// Resolves a map character.
    #[must_use]
    pub const fn from_char(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Self::Grass),
            'f' => Some(Self::Farmland),
            '~' => Some(Self::Water),
            '#' => Some(Self::Rock),
            _ => None,
        }
    }

    const fn kind(self) -> TileKind {
        match self {
            Self::Grass => TileKind::Grass,
            Self::Farmland => TileKind::Farmland { tilled: false },
            Self::Water => TileKind::Water,
            Self::Rock => TileKind::Rock,
        }
    }
}

/// Row-major grid of tile symbols.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapLayout {
    columns: usize,
    rows: usize,
    cells: Vec<TileSymbol>,
}

impl MapLayout {
    /// Parses a map: a `<columns>x<rows>` header followed by one line per row.
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let mut lines = text.lines().filter(|line| !line.trim().is_empty());
        let header = lines
            .next()
            .ok_or_else(|| LoadError::MalformedDimensions(String::new()))?;
        let (columns, rows) = parse_dimensions(header.trim())?;

        let mut cells = Vec::with_capacity(columns * rows);
        let mut found_rows = 0;
        for (row, line) in lines.enumerate() {
            found_rows += 1;
            if row >= rows {
                continue;
            }
            let symbols: Vec<char> = line.trim_end().chars().collect();
            if symbols.len() != columns {
                return Err(LoadError::RaggedRow {
                    row,
                    expected: columns,
                    found: symbols.len(),
                });
            }
            for (column, symbol) in symbols.into_iter().enumerate() {
                let tile = TileSymbol::from_char(symbol).ok_or(LoadError::UnknownTileSymbol {
                    row,
                    column,
                    symbol,
                })?;
                cells.push(tile);
            }
        }

        if found_rows != rows {
            return Err(LoadError::RowCountMismatch {
                expected: rows,
                found: found_rows,
            });
        }

        Ok(Self {
            columns,
            rows,
            cells,
        })
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Whether the signed cell coordinates lie inside the grid.
    #[must_use]
    pub fn contains(&self, column: i32, row: i32) -> bool {
        let inside = |value: i32, limit: usize| {
            usize::try_from(value).is_ok_and(|value| value < limit)
        };
        inside(column, self.columns) && inside(row, self.rows)
    }

    /// Symbol at the provided cell, if it lies inside the grid.
    #[must_use]
    pub fn symbol(&self, column: usize, row: usize) -> Option<TileSymbol> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.cells.get(row * self.columns + column).copied()
    }

    /// Builds one tile per cell, spaced by the dimensions' tile size.
    #[must_use]
    pub fn build_world(&self, dimensions: Dimensions) -> World {
        let mut world = World::new();
        for (index, symbol) in self.cells.iter().enumerate() {
            let column = (index % self.columns) as i32;
            let row = (index / self.columns) as i32;
            world.place(Tile::new(
                symbol.kind(),
                dimensions.cell_to_pixel(column, row),
            ));
        }
        world
    }
}

fn parse_dimensions(header: &str) -> Result<(usize, usize), LoadError> {
    let malformed = || LoadError::MalformedDimensions(header.to_owned());
    let (columns, rows) = header.split_once(['x', 'X']).ok_or_else(malformed)?;
    let columns = columns.trim().parse::<usize>().map_err(|_| malformed())?;
    let rows = rows.trim().parse::<usize>().map_err(|_| malformed())?;
    if columns == 0 || rows == 0 {
        return Err(malformed());
    }
    Ok((columns, rows))
}

/// Starting resource pools.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StartingResources {
    /// Coins the player starts with.
    pub coins: u32,
    /// Food the player starts with.
    pub food: u32,
}

/// Cell where the player starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerSpawn {
    /// Tile column.
    pub column: i32,
    /// Tile row.
    pub row: i32,
}

/// Spawner declared by a detail file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnerDetail {
    /// Species the spawner creates.
    pub species: RaiderSpecies,
    /// Tile column of the spawn point.
    pub column: i32,
    /// Tile row of the spawn point.
    pub row: i32,
    /// Ticks between spawns.
    pub interval: u32,
}

/// Resource placed on the map at load time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourcePlacement {
    /// Kind of resource.
    pub kind: ResourceKind,
    /// Tile column.
    pub column: i32,
    /// Tile row.
    pub row: i32,
}

/// Parsed contents of a detail file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Details {
    /// Starting resource pools.
    pub starting: StartingResources,
    /// Where the player starts.
    pub player: PlayerSpawn,
    /// Raider spawners in declaration order.
    pub spawners: Vec<SpawnerDetail>,
    /// Static resources in declaration order.
    pub resources: Vec<ResourcePlacement>,
}

impl Details {
    /// Parses a line-oriented `key: value` detail file.
    ///
    /// Blank lines and lines starting with `//` are ignored.
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let mut starting = StartingResources::default();
        let mut player = None;
        let mut spawners = Vec::new();
        let mut resources = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
                continue;
            }

            let (key, value) = trimmed
                .split_once(':')
                .ok_or_else(|| malformed(line, "expected 'key: value'"))?;
            let value = value.trim();
            match key.trim() {
                "coins" => starting.coins = parse_amount(line, value)?,
                "food" => starting.food = parse_amount(line, value)?,
                "player" => {
                    let (column, row) = parse_cell(line, value)?;
                    player = Some(PlayerSpawn { column, row });
                }
                "spawner" => spawners.push(parse_spawner(line, value)?),
                "resource" => resources.push(parse_resource(line, value)?),
                other => {
                    return Err(LoadError::UnknownDetailKey {
                        line,
                        key: other.to_owned(),
                    })
                }
            }
        }

        Ok(Self {
            starting,
            player: player.ok_or(LoadError::MissingPlayerSpawn)?,
            spawners,
            resources,
        })
    }
}

fn malformed(line: usize, reason: impl Into<String>) -> LoadError {
    LoadError::MalformedDetail {
        line,
        reason: reason.into(),
    }
}

fn parse_amount(line: usize, value: &str) -> Result<u32, LoadError> {
    value
        .parse::<u32>()
        .map_err(|_| malformed(line, format!("'{value}' is not a non-negative amount")))
}

fn parse_cell(line: usize, value: &str) -> Result<(i32, i32), LoadError> {
    let (column, row) = value
        .split_once(',')
        .ok_or_else(|| malformed(line, format!("'{value}' is not a 'column,row' pair")))?;
    let column = column
        .trim()
        .parse::<i32>()
        .map_err(|_| malformed(line, format!("'{column}' is not a column")))?;
    let row = row
        .trim()
        .parse::<i32>()
        .map_err(|_| malformed(line, format!("'{row}' is not a row")))?;
    Ok((column, row))
}

fn parse_spawner(line: usize, value: &str) -> Result<SpawnerDetail, LoadError> {
    let fields: Vec<&str> = value.split_whitespace().collect();
    let [species, cell, interval] = fields.as_slice() else {
        return Err(malformed(line, "expected '<species> column,row <interval>'"));
    };
    let species = RaiderSpecies::from_name(species)
        .ok_or_else(|| malformed(line, format!("unknown species '{species}'")))?;
    let (column, row) = parse_cell(line, cell)?;
    let interval = parse_amount(line, interval)?;
    if interval == 0 {
        return Err(malformed(line, "spawn interval must be positive"));
    }
    Ok(SpawnerDetail {
        species,
        column,
        row,
        interval,
    })
}

fn parse_resource(line: usize, value: &str) -> Result<ResourcePlacement, LoadError> {
    let fields: Vec<&str> = value.split_whitespace().collect();
    let [kind, cell] = fields.as_slice() else {
        return Err(malformed(line, "expected '<resource> column,row'"));
    };
    let kind = ResourceKind::from_name(kind)
        .ok_or_else(|| malformed(line, format!("unknown resource '{kind}'")))?;
    let (column, row) = parse_cell(line, cell)?;
    Ok(ResourcePlacement { kind, column, row })
}

/// Fully assembled level ready to hand to a simulation.
#[derive(Debug)]
pub struct Level {
    /// Tiles with their static resources placed.
    pub world: World,
    /// Player resource pools.
    pub inventory: Inventory,
    /// Pixel position where the player starts.
    pub player_spawn: IVec2,
    /// Declared spawners, with cell coordinates still in tiles.
    pub spawners: Vec<SpawnerDetail>,
}

impl Level {
    /// Parses both files and assembles the level.
    pub fn load(map: &str, details: &str, dimensions: Dimensions) -> Result<Self, LoadError> {
        let layout = MapLayout::parse(map)?;
        let details = Details::parse(details)?;
        Self::assemble(&layout, details, dimensions)
    }

    /// Assembles a level from already parsed records.
    pub fn assemble(
        layout: &MapLayout,
        details: Details,
        dimensions: Dimensions,
    ) -> Result<Self, LoadError> {
        let bounded = |record: &'static str, column: i32, row: i32| {
            if layout.contains(column, row) {
                Ok(())
            } else {
                Err(LoadError::OutOfBounds {
                    record,
                    column,
                    row,
                })
            }
        };
        bounded("player", details.player.column, details.player.row)?;
        for spawner in &details.spawners {
            bounded("spawner", spawner.column, spawner.row)?;
        }
        for placement in &details.resources {
            bounded(placement.kind.as_str(), placement.column, placement.row)?;
        }

        let mut world = layout.build_world(dimensions);
        let tile_size = dimensions.tile_size();

        for placement in &details.resources {
            let position = dimensions.cell_to_pixel(placement.column, placement.row);
            let ground = world
                .tiles_at_position_mut(position, tile_size)
                .into_iter()
                .find(|tile| {
                    tile.accepts(placement.kind)
                        && (placement.kind != ResourceKind::Cabbage
                            || tile.stacked_entities().is_empty())
                })
                .ok_or(LoadError::UnsupportedPlacement {
                    resource: placement.kind.as_str(),
                    column: placement.column,
                    row: placement.row,
                })?;
            let stacked: Box<dyn StackedEntity> = match placement.kind {
                ResourceKind::Cabbage => {
                    let _ = ground.till()?;
                    Box::new(Cabbage::new(position))
                }
                ResourceKind::Ore => Box::new(Ore::new(position)),
            };
            ground.place_on(stacked);
        }

        info!(
            columns = layout.columns(),
            rows = layout.rows(),
            tiles = world.len(),
            resources = details.resources.len(),
            spawners = details.spawners.len(),
            "level_loaded"
        );

        Ok(Self {
            world,
            inventory: Inventory::new(details.starting.coins, details.starting.food),
            player_spawn: dimensions.cell_to_pixel(details.player.column, details.player.row),
            spawners: details.spawners,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rectangular_map() {
        let layout = MapLayout::parse("3x2\n.f~\n#..\n").expect("valid map");
        assert_eq!(layout.columns(), 3);
        assert_eq!(layout.rows(), 2);
        assert_eq!(layout.symbol(2, 0), Some(TileSymbol::Water));
        assert_eq!(layout.symbol(0, 1), Some(TileSymbol::Rock));
        assert_eq!(layout.symbol(3, 0), None);
    }

    #[test]
    fn unknown_symbol_reports_position() {
        let error = MapLayout::parse("2x2\n..\n.?\n").expect_err("bad symbol");
        assert_eq!(
            error,
            LoadError::UnknownTileSymbol {
                row: 1,
                column: 1,
                symbol: '?',
            }
        );
    }

    #[test]
    fn malformed_header_is_rejected() {
        assert!(matches!(
            MapLayout::parse("wide\n..\n"),
            Err(LoadError::MalformedDimensions(_))
        ));
        assert!(matches!(
            MapLayout::parse("0x2\n"),
            Err(LoadError::MalformedDimensions(_))
        ));
    }

    #[test]
    fn ragged_and_missing_rows_are_rejected() {
        assert_eq!(
            MapLayout::parse("3x1\n..\n"),
            Err(LoadError::RaggedRow {
                row: 0,
                expected: 3,
                found: 2,
            })
        );
        assert_eq!(
            MapLayout::parse("1x3\n.\n.\n"),
            Err(LoadError::RowCountMismatch {
                expected: 3,
                found: 2,
            })
        );
    }

    #[test]
    fn parses_detail_records() {
        let details = Details::parse(
            "// meadow\ncoins: 12\nfood: 4\nplayer: 3,2\n\nspawner: eagle 0,0 90\nresource: ore 1,1\n",
        )
        .expect("valid details");
        assert_eq!(details.starting, StartingResources { coins: 12, food: 4 });
        assert_eq!(details.player, PlayerSpawn { column: 3, row: 2 });
        assert_eq!(
            details.spawners,
            vec![SpawnerDetail {
                species: RaiderSpecies::Eagle,
                column: 0,
                row: 0,
                interval: 90,
            }]
        );
        assert_eq!(
            details.resources,
            vec![ResourcePlacement {
                kind: ResourceKind::Ore,
                column: 1,
                row: 1,
            }]
        );
    }

    #[test]
    fn detail_errors_carry_line_numbers() {
        assert_eq!(
            Details::parse("player: 1,1\nweather: rain\n"),
            Err(LoadError::UnknownDetailKey {
                line: 2,
                key: "weather".to_owned(),
            })
        );
        assert!(matches!(
            Details::parse("player: 1,1\nspawner: crow 0,0 5\n"),
            Err(LoadError::MalformedDetail { line: 2, .. })
        ));
        assert!(matches!(
            Details::parse("coins: lots\nplayer: 1,1\n"),
            Err(LoadError::MalformedDetail { line: 1, .. })
        ));
        assert_eq!(Details::parse("coins: 3\n"), Err(LoadError::MissingPlayerSpawn));
    }
}
