//! Requirement accumulator.
//!
//! Tracks the active anchor, the declared path, the difficulty, and one
//! requirement fragment per indentation depth. Each structured line moves
//! the state machine and may complete a requirement:
//!
//! ```text
//! Idle --anchor--> AnchorActive --path--> PathDeclared --difficulty--> Accumulating
//!   ^                   |                      |                           |
//!   +--requirement------+                      +---------- terminal -------+
//! ```
//!
//! A terminal line joins every non-empty fragment from depth 1 down to its
//! own depth into one flat requirement.

use arealogic_foundation::{Difficulty, Error, ErrorKind, PathKind, Result};

use crate::line::{Line, declared_name, first_word};
use crate::options::{CompileOptions, MAX_DEPTH};
use crate::tables::RefillToken;

/// Keywords of depth-1 blocks that carry no traversal logic.
const SPAWN_BLOCKS: [&str; 2] = ["nospawn", "tprestriction"];

/// Separator used when joining fragments into a flat requirement.
const FRAGMENT_SEPARATOR: &str = ", ";

/// Door details for an edge leaving a door node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DoorLink {
    /// Anchor owning the door.
    pub anchor: String,
    /// Door node name.
    pub node: String,
    /// Numeric door id.
    pub id: u32,
    /// Vanilla target door.
    pub target: String,
}

/// An edge a requirement is attached to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    /// Source node.
    pub from: String,
    /// Target node or event.
    pub to: String,
    /// Kind of path that declared the edge.
    pub kind: PathKind,
    /// Door details, for door edges.
    pub door: Option<DoorLink>,
}

impl Edge {
    /// Edge name in `"A -> B"` form.
    #[must_use]
    pub fn name(&self) -> String {
        crate::tables::edge_name(&self.from, &self.to)
    }
}

/// A completed requirement, ready for rule synthesis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Terminal {
    /// The edge the requirement guards.
    pub edge: Edge,
    /// Difficulty the requirement was declared at.
    pub difficulty: Difficulty,
    /// Flat requirement text; empty means free.
    pub requirement: String,
}

/// What a line did to the accumulator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Nothing observable (ignored line, door field, opened block).
    None,
    /// A new anchor became active.
    AnchorEntered(String),
    /// The anchor was cleared by a `requirement` or `region` declaration.
    AnchorCleared(String),
    /// A path was declared.
    PathDeclared {
        /// Kind of path.
        kind: PathKind,
        /// Anchor the path leaves from.
        from: String,
        /// Target name (refill event name for refills).
        to: String,
        /// Refill declared by a refill path.
        refill: Option<RefillToken>,
        /// Requirement completed on the same line, for inline paths.
        terminal: Option<Terminal>,
    },
    /// A depth-1 block was skipped along with its children.
    PathSkipped(String),
    /// A terminal line completed a requirement.
    Terminal(Terminal),
}

/// Fields collected under a `door` block.
#[derive(Clone, Debug, Default)]
struct DoorDraft {
    id: Option<u32>,
    target: Option<String>,
}

/// The path currently accumulating requirements.
#[derive(Clone, Debug)]
struct PathState {
    kind: PathKind,
    target: String,
    door: Option<DoorDraft>,
}

/// Carries requirement fragments across indentation levels.
#[derive(Clone, Debug)]
pub struct RequirementAccumulator {
    /// Active anchor, if any.
    anchor: Option<String>,
    /// Active path under the anchor.
    path: Option<PathState>,
    /// Difficulty of the current branch.
    difficulty: Difficulty,
    /// Fragment per depth; index 0 is unused.
    fragments: [String; MAX_DEPTH + 1],
    /// Deepest depth whose line opened a block.
    open: usize,
    /// Lines deeper than this are ignored.
    skip_below: Option<usize>,
    /// Deepest accepted depth.
    max_depth: usize,
    /// Whether spawn restriction blocks are skipped.
    skip_spawn_blocks: bool,
}

impl Default for RequirementAccumulator {
    fn default() -> Self {
        Self::new(&CompileOptions::default())
    }
}

impl RequirementAccumulator {
    /// Creates an idle accumulator.
    #[must_use]
    pub fn new(options: &CompileOptions) -> Self {
        Self {
            anchor: None,
            path: None,
            difficulty: Difficulty::Moki,
            fragments: Default::default(),
            open: 0,
            skip_below: None,
            max_depth: options.max_depth.min(MAX_DEPTH),
            skip_spawn_blocks: options.skip_spawn_blocks,
        }
    }

    /// The active anchor.
    #[must_use]
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    /// The difficulty of the current branch.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Feeds one structured line.
    ///
    /// # Errors
    /// Returns structural errors for unknown keywords, unknown difficulties,
    /// unexpected indentation, and incomplete door blocks.
    pub fn feed(&mut self, line: &Line<'_>) -> Result<Transition> {
        if line.depth > self.max_depth {
            return Err(Error::indent_too_deep(line.depth, self.max_depth));
        }
        if let Some(depth) = self.skip_below {
            if line.depth > depth {
                return Ok(Transition::None);
            }
            self.skip_below = None;
        }

        if line.depth == 0 {
            return self.declaration(line);
        }
        if self.anchor.is_none() {
            return Ok(Transition::None);
        }
        if line.depth > self.open + 1 {
            return Err(Error::malformed(format!(
                "unexpected indentation at depth {}",
                line.depth
            )));
        }

        for fragment in &mut self.fragments[line.depth..] {
            fragment.clear();
        }

        if line.depth == 1 {
            return self.path_line(line);
        }

        let door = self.path.as_ref().and_then(|p| p.door.as_ref()).is_some();
        if door && line.depth == 2 {
            return self.door_field(line);
        }

        let difficulty_depth = if door { 3 } else { 2 };
        if line.depth == difficulty_depth {
            self.difficulty_line(line)
        } else {
            let opens = line.opens_block() && line.depth < self.max_depth;
            self.fragment_line(line.depth, line.text.trim_end_matches(':').trim(), opens)
        }
    }

    fn declaration(&mut self, line: &Line<'_>) -> Result<Transition> {
        self.path = None;
        self.open = 0;
        self.difficulty = Difficulty::Moki;

        let keyword = line.keyword();
        match keyword {
            "anchor" => {
                let name = declared_name(line.text)
                    .ok_or_else(|| Error::malformed("anchor without a name"))?;
                self.anchor = Some(name.to_string());
                Ok(Transition::AnchorEntered(name.to_string()))
            }
            "requirement" | "region" => {
                self.anchor = None;
                Ok(Transition::AnchorCleared(keyword.to_string()))
            }
            _ => Err(Error::new(ErrorKind::UnknownDeclaration(keyword.to_string()))),
        }
    }

    fn path_line(&mut self, line: &Line<'_>) -> Result<Transition> {
        self.difficulty = Difficulty::Moki;
        self.path = None;
        self.open = 0;

        let keyword = line.keyword();
        if self.skip_spawn_blocks && SPAWN_BLOCKS.contains(&keyword) {
            self.skip_below = Some(1);
            return Ok(Transition::PathSkipped(keyword.to_string()));
        }

        let kind =
            PathKind::from_keyword(keyword).ok_or_else(|| Error::unknown_path_kind(keyword))?;
        let rest = line.text[keyword.len()..].trim_start();
        let (name, inline) = match rest.split_once(':') {
            Some((name, inline)) => (name.trim(), Some(inline.trim())),
            None => (rest.trim(), None),
        };
        if name.is_empty() {
            return Err(Error::malformed(format!("{keyword} without a name")));
        }
        let anchor = self.anchor.clone().unwrap_or_default();

        if kind == PathKind::Door {
            if inline.is_none_or(|i| !i.is_empty()) {
                return Err(Error::malformed("door must open a block"));
            }
            self.path = Some(PathState {
                kind,
                target: name.to_string(),
                door: Some(DoorDraft::default()),
            });
            self.open = 1;
            return Ok(Transition::PathDeclared {
                kind,
                from: anchor,
                to: name.to_string(),
                refill: None,
                terminal: None,
            });
        }

        let refill = if kind == PathKind::Refill {
            Some(RefillToken::parse(name)?)
        } else {
            None
        };
        let target = match refill {
            Some(token) => token.event_name(&anchor),
            None => name.to_string(),
        };

        let terminal = match inline {
            None if refill.is_some() => Some(String::new()),
            None => return Err(Error::malformed(format!("expected ':' after {keyword} {name}"))),
            Some("") => None,
            Some(inline) => Some(inline.to_string()),
        };

        self.path = Some(PathState {
            kind,
            target: target.clone(),
            door: None,
        });

        let terminal = match terminal {
            Some(requirement) => {
                self.fragments[1] = requirement;
                Some(self.complete(1)?)
            }
            None => {
                self.open = 1;
                None
            }
        };

        Ok(Transition::PathDeclared {
            kind,
            from: anchor,
            to: target,
            refill,
            terminal,
        })
    }

    fn door_field(&mut self, line: &Line<'_>) -> Result<Transition> {
        let keyword = line.keyword();
        let value = line.text[keyword.len()..].trim_start_matches(':').trim();
        let draft = self
            .path
            .as_mut()
            .and_then(|p| p.door.as_mut())
            .ok_or_else(|| Error::malformed("door field outside a door block"))?;

        match keyword {
            "id" => {
                let id = value
                    .parse()
                    .map_err(|_| Error::invalid_payload("id", value))?;
                draft.id = Some(id);
                self.open = 1;
            }
            "target" => {
                if value.is_empty() {
                    return Err(Error::malformed("door target without a name"));
                }
                draft.target = Some(value.to_string());
                self.open = 1;
            }
            "enter" => {
                if draft.id.is_none() {
                    return Err(Error::new(ErrorKind::MissingDoorField("id")));
                }
                if draft.target.is_none() {
                    return Err(Error::new(ErrorKind::MissingDoorField("target")));
                }
                self.open = 2;
            }
            _ => {
                return Err(Error::malformed(format!("unknown door field '{keyword}'")));
            }
        }
        Ok(Transition::None)
    }

    fn difficulty_line(&mut self, line: &Line<'_>) -> Result<Transition> {
        let word = first_word(line.text);
        self.difficulty =
            Difficulty::from_keyword(word).ok_or_else(|| Error::unknown_difficulty(word))?;

        let remainder = line.text[word.len()..]
            .trim_start()
            .trim_start_matches([':', ','])
            .trim();
        let opens =
            (remainder.is_empty() || remainder.ends_with(':')) && line.depth < self.max_depth;
        self.fragment_line(line.depth, remainder.trim_end_matches(':').trim(), opens)
    }

    fn fragment_line(&mut self, depth: usize, fragment: &str, opens: bool) -> Result<Transition> {
        self.fragments[depth] = fragment.to_string();
        if opens {
            self.open = depth;
            Ok(Transition::None)
        } else {
            self.open = depth - 1;
            self.complete(depth).map(Transition::Terminal)
        }
    }

    /// Joins fragments `1..=depth` into a terminal requirement.
    fn complete(&self, depth: usize) -> Result<Terminal> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| Error::malformed("requirement without a path"))?;
        let anchor = self.anchor.clone().unwrap_or_default();

        let edge = match &path.door {
            Some(draft) => {
                let (Some(id), Some(target)) = (draft.id, draft.target.clone()) else {
                    return Err(Error::new(ErrorKind::MissingDoorField("enter")));
                };
                Edge {
                    from: path.target.clone(),
                    to: target.clone(),
                    kind: path.kind,
                    door: Some(DoorLink {
                        anchor,
                        node: path.target.clone(),
                        id,
                        target,
                    }),
                }
            }
            None => Edge {
                from: anchor,
                to: path.target.clone(),
                kind: path.kind,
                door: None,
            },
        };

        let requirement = self.fragments[1..=depth]
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .collect::<Vec<_>>()
            .join(FRAGMENT_SEPARATOR);

        Ok(Terminal {
            edge,
            difficulty: self.difficulty,
            requirement,
        })
    }
}
