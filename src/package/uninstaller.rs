//! Removal of installed mods by position or inclusive position range

use crate::core::{ModmanError, ModmanResult};
use crate::di::traits::RegistryStore;
use crate::package::registry::{InstalledRecord, Registry};
use std::collections::BTreeSet;

/// Which records to remove
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Inclusive `low-high`
    Range { low: usize, high: usize },
    Positions(Vec<usize>),
}

impl Selection {
    /// Parse either a single `low-high` argument or one or more positions.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> ModmanResult<Self> {
        match args {
            [] => Err(ModmanError::InvalidRange("no id given".to_string())),
            [single] if single.as_ref().contains('-') => {
                let text = single.as_ref();
                let (low, high) = text
                    .split_once('-')
                    .ok_or_else(|| ModmanError::InvalidRange(text.to_string()))?;
                Ok(Selection::Range {
                    low: parse_position(low)?,
                    high: parse_position(high)?,
                })
            }
            many => many
                .iter()
                .map(|arg| parse_position(arg.as_ref()))
                .collect::<ModmanResult<Vec<_>>>()
                .map(Selection::Positions),
        }
    }

    /// Validate against a registry of `count` records and return the
    /// positions to remove, highest first, without duplicates.
    pub fn resolve(&self, count: usize) -> ModmanResult<Vec<usize>> {
        let positions: BTreeSet<usize> = match self {
            Selection::Range { low, high } => {
                if low > high {
                    return Err(ModmanError::InvalidRange(format!(
                        "{}-{}: start is greater than end",
                        low, high
                    )));
                }
                if *high >= count {
                    return Err(out_of_range(*high, count));
                }
                (*low..=*high).collect()
            }
            Selection::Positions(list) => {
                if let Some(bad) = list.iter().find(|p| **p >= count) {
                    return Err(out_of_range(*bad, count));
                }
                list.iter().copied().collect()
            }
        };
        Ok(positions.into_iter().rev().collect())
    }
}

fn parse_position(text: &str) -> ModmanResult<usize> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ModmanError::InvalidRange(format!("\"{}\" is not a valid id", text)));
    }
    text.parse()
        .map_err(|_| ModmanError::InvalidRange(format!("\"{}\" is too large", text)))
}

fn out_of_range(position: usize, count: usize) -> ModmanError {
    ModmanError::InvalidRange(format!(
        "{} is not a valid id ({} mods installed)",
        position, count
    ))
}

/// Removes records and their files, then saves the registry
pub struct Uninstaller<'a> {
    registry: &'a mut Registry,
    store: &'a dyn RegistryStore,
}

impl<'a> Uninstaller<'a> {
    pub fn new(registry: &'a mut Registry, store: &'a dyn RegistryStore) -> Self {
        Self { registry, store }
    }

    /// Validate every argument first, then remove highest position first.
    /// Nothing is removed if validation fails.
    pub fn uninstall<S: AsRef<str>>(&mut self, args: &[S]) -> ModmanResult<Vec<InstalledRecord>> {
        let positions = Selection::parse(args)?.resolve(self.registry.len())?;

        let mut removed = Vec::with_capacity(positions.len());
        for position in positions {
            let record = self.registry.remove_at(position)?;
            println!("-> Removing {}", record.display_name);
            removed.push(record);
        }

        self.store.save(self.registry)?;
        Ok(removed)
    }
}
