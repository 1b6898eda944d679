// Copyright (C) 2019 Oscar Shrimpton
//
// This file is part of q3reflex.
//
// q3reflex is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// q3reflex is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with q3reflex.  If not, see <http://www.gnu.org/licenses/>.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

const QUOTE: char = '"';

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A game entity
pub struct Entity {
    pub classname: String,
    pub attributes: HashMap<String, String>,
}

impl Entity {
    /// Build an entity from the attributes in its block.
    /// The world and anything without a classname aren't kept.
    pub fn from_attributes(attributes: HashMap<String, String>) -> Option<Entity> {
        let classname = attributes.get("classname")?.clone();
        if classname == "worldspawn" {
            return None;
        }

        Some(Entity {
            classname,
            attributes,
        })
    }

    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// Internal enum to parse through a key/value line.
#[derive(PartialEq, Eq)]
enum ParseState {
    BeforeKey,
    InKey,
    AfterKey,
    InValue,
}

/// Parse a line like `"key" "value"`. Values can contain spaces.
/// Returns `None` if the line doesn't hold a full pair.
pub fn parse_property(line: &str) -> Option<(String, String)> {
    use self::ParseState::*;

    let mut state = BeforeKey;
    let mut key_start = 0;
    let mut key_end = 0;
    let mut val_start = 0;

    for (i, chr) in line.char_indices() {
        if chr != QUOTE {
            continue;
        }

        match state {
            BeforeKey => {
                state = InKey;
                key_start = i + 1;
            }
            InKey => {
                state = AfterKey;
                key_end = i;
            }
            AfterKey => {
                state = InValue;
                val_start = i + 1;
            }
            InValue => {
                return Some((
                    line[key_start..key_end].to_owned(),
                    line[val_start..i].to_owned(),
                ));
            }
        }
    }

    None
}

#[test]
fn property_with_spaces() {
    assert_eq!(
        parse_property(r#""message" "welcome to  the arena""#),
        Some(("message".to_string(), "welcome to  the arena".to_string()))
    );
    assert_eq!(
        parse_property(r#"  "origin" "-64 128 24""#),
        Some(("origin".to_string(), "-64 128 24".to_string()))
    );
}

#[test]
fn incomplete_property() {
    assert_eq!(parse_property(r#""origin" "-64 128"#), None);
    assert_eq!(parse_property("origin 12"), None);
}

#[test]
fn worldspawn_not_kept() {
    let mut attrs = HashMap::new();
    attrs.insert("classname".to_string(), "worldspawn".to_string());
    assert_eq!(Entity::from_attributes(attrs), None);

    assert_eq!(Entity::from_attributes(HashMap::new()), None);

    let mut attrs = HashMap::new();
    attrs.insert("classname".to_string(), "info_player_start".to_string());
    attrs.insert("angle".to_string(), "90".to_string());
    let ent = Entity::from_attributes(attrs).unwrap();
    assert_eq!(ent.classname, "info_player_start");
    assert_eq!(ent.get_attr("angle"), Some("90"));
}
