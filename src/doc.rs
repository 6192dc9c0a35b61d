//! Scene model: player tokens, arrows, and the store that owns them.
//!
//! The scene is the single source of truth for what is on the court. The
//! renderer draws it from scratch each frame; input handling mutates it only
//! through `Scene` methods. Exactly fourteen tokens exist for the lifetime of a
//! scene (seven roles for each of two teams). Arrows come and go.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Point;

/// Unique identifier for an arrow. Runtime only; not persisted.
pub type ArrowId = Uuid;

/// Team a token plays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Blue,
    Teal,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::Blue, Team::Teal];

    /// Fill color used for this team's tokens.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Blue => "#4285F4",
            Self::Teal => "#1DB584",
        }
    }
}

/// Playing position. Declaration order is the bench order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "GS")]
    GoalShooter,
    #[serde(rename = "GA")]
    GoalAttack,
    #[serde(rename = "WA")]
    WingAttack,
    #[serde(rename = "C")]
    Centre,
    #[serde(rename = "WD")]
    WingDefence,
    #[serde(rename = "GD")]
    GoalDefence,
    #[serde(rename = "GK")]
    GoalKeeper,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::GoalShooter,
        Role::GoalAttack,
        Role::WingAttack,
        Role::Centre,
        Role::WingDefence,
        Role::GoalDefence,
        Role::GoalKeeper,
    ];

    /// Short label drawn on the token.
    #[must_use]
    pub fn abbrev(self) -> &'static str {
        match self {
            Self::GoalShooter => "GS",
            Self::GoalAttack => "GA",
            Self::WingAttack => "WA",
            Self::Centre => "C",
            Self::WingDefence => "WD",
            Self::GoalDefence => "GD",
            Self::GoalKeeper => "GK",
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::GoalShooter => "Goal Shooter",
            Self::GoalAttack => "Goal Attack",
            Self::WingAttack => "Wing Attack",
            Self::Centre => "Centre",
            Self::WingDefence => "Wing Defence",
            Self::GoalDefence => "Goal Defence",
            Self::GoalKeeper => "Goal Keeper",
        }
    }

    /// Position in the bench column, 0-based.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::GoalShooter => 0,
            Self::GoalAttack => 1,
            Self::WingAttack => 2,
            Self::Centre => 3,
            Self::WingDefence => 4,
            Self::GoalDefence => 5,
            Self::GoalKeeper => 6,
        }
    }

    /// Starting x position as a fraction of court width, for the blue team.
    #[must_use]
    pub fn formation_fraction(self) -> f64 {
        match self {
            Self::GoalShooter => 0.1,
            Self::GoalAttack => 0.25,
            Self::WingAttack => 0.4,
            Self::Centre => 0.45,
            Self::WingDefence => 0.55,
            Self::GoalDefence => 0.75,
            Self::GoalKeeper => 0.9,
        }
    }
}

/// Identifies a token: one per (team, role) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenId {
    pub team: Team,
    pub role: Role,
}

impl TokenId {
    #[must_use]
    pub fn new(team: Team, role: Role) -> Self {
        Self { team, role }
    }
}

/// A draggable player marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub id: TokenId,
    /// Center in canvas space.
    pub pos: Point,
    pub on_court: bool,
}

/// A straight arrow from `start` to `end`. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub id: ArrowId,
    pub start: Point,
    pub end: Point,
}

impl Arrow {
    #[must_use]
    pub fn new(start: Point, end: Point) -> Self {
        Self { id: Uuid::new_v4(), start, end }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

/// In-memory store of tokens and arrows.
#[derive(Debug, Clone)]
pub struct Scene {
    tokens: Vec<Token>,
    arrows: Vec<Arrow>,
}

impl Scene {
    /// Create the fourteen tokens, all off court at the origin. Callers lay
    /// them out once geometry is known.
    #[must_use]
    pub fn new() -> Self {
        let tokens = Team::ALL
            .iter()
            .flat_map(|&team| {
                Role::ALL.iter().map(move |&role| Token {
                    id: TokenId::new(team, role),
                    pos: Point::default(),
                    on_court: false,
                })
            })
            .collect();
        Self { tokens, arrows: Vec::new() }
    }

    // --- Tokens ---

    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn tokens_mut(&mut self) -> impl Iterator<Item = &mut Token> {
        self.tokens.iter_mut()
    }

    #[must_use]
    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id == id)
    }

    pub fn token_mut(&mut self, id: TokenId) -> Option<&mut Token> {
        self.tokens.iter_mut().find(|t| t.id == id)
    }

    /// Move a token and set its on-court flag. Returns false for an unknown id.
    pub fn place_token(&mut self, id: TokenId, pos: Point, on_court: bool) -> bool {
        let Some(token) = self.token_mut(id) else {
            return false;
        };
        token.pos = pos;
        token.on_court = on_court;
        true
    }

    #[must_use]
    pub fn on_court(&self) -> Vec<&Token> {
        self.tokens.iter().filter(|t| t.on_court).collect()
    }

    #[must_use]
    pub fn off_court(&self) -> Vec<&Token> {
        self.tokens.iter().filter(|t| !t.on_court).collect()
    }

    /// Move `id` to the end of the draw order so it renders on top.
    pub fn raise_token(&mut self, id: TokenId) {
        if let Some(idx) = self.tokens.iter().position(|t| t.id == id) {
            let token = self.tokens.remove(idx);
            self.tokens.push(token);
        }
    }

    // --- Arrows ---

    #[must_use]
    pub fn arrows(&self) -> &[Arrow] {
        &self.arrows
    }

    #[must_use]
    pub fn arrow(&self, id: &ArrowId) -> Option<&Arrow> {
        self.arrows.iter().find(|a| a.id == *id)
    }

    pub fn insert_arrow(&mut self, arrow: Arrow) {
        self.arrows.push(arrow);
    }

    /// Remove an arrow by id, returning it if it was present.
    pub fn remove_arrow(&mut self, id: &ArrowId) -> Option<Arrow> {
        let idx = self.arrows.iter().position(|a| a.id == *id)?;
        Some(self.arrows.remove(idx))
    }

    /// Remove every arrow, returning how many were removed.
    pub fn clear_arrows(&mut self) -> usize {
        let n = self.arrows.len();
        self.arrows.clear();
        n
    }

    /// Replace all arrows.
    pub fn set_arrows(&mut self, arrows: Vec<Arrow>) {
        self.arrows = arrows;
    }

    #[must_use]
    pub fn arrow_count(&self) -> usize {
        self.arrows.len()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
