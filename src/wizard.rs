//! Region selection wizard
//!
//! Walks a user down the geographic hierarchy (oblast → district → city) one
//! message at a time and decides, at every level, whether to descend further
//! or to terminate and bind a region. Pure logic over a loaded [`RegionTree`]:
//! no Telegram, no database, no network — the handlers own those side
//! effects, which keeps every branch of the state machine unit-testable.
//!
//! Sessions remember stable node *ids*, not display names, so two siblings
//! sharing a name at different branches can never cross wires between steps.

use crate::core::config::wizard::MAX_CITY_REPROMPTS;
use crate::core::error::{AppError, AppResult};
use crate::services::regions::{RegionNode, RegionTree};

/// Where a user currently is inside the selection flow.
///
/// Idle is not represented here: a user with no active stage simply has no
/// wizard state in their dialogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardStage {
    /// Waiting for a top-level region name.
    AwaitingOblast,
    /// Waiting for a district inside the chosen oblast.
    AwaitingDistrict { oblast_id: String },
    /// Waiting for a city inside the chosen district. `reprompts` counts
    /// how many times a malformed (non-leaf) city has been re-prompted.
    AwaitingCity {
        oblast_id: String,
        district_id: String,
        reprompts: u8,
    },
}

/// What a single wizard step produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardOutcome {
    /// Present these child names (tree order) and wait at `next`.
    Descend { options: Vec<String>, next: WizardStage },
    /// Terminal: bind this region to the user and leave the flow.
    Complete { region_name: String, region_id: String },
    /// Input matched nothing at this level; the stage is unchanged.
    NoMatch,
    /// A matched city unexpectedly has children. Echo its name and wait
    /// again at `next` (same level, incremented re-prompt counter).
    Malformed { region_name: String, next: WizardStage },
}

/// Exact, case-sensitive match of trimmed input against sibling names.
/// First match in tree order wins.
fn match_sibling<'a>(siblings: &'a [RegionNode], input: &str) -> Option<&'a RegionNode> {
    let wanted = input.trim();
    siblings.iter().find(|n| n.region_name == wanted)
}

fn find_by_id<'a>(siblings: &'a [RegionNode], id: &str) -> Option<&'a RegionNode> {
    siblings.iter().find(|n| n.region_id == id)
}

fn complete(node: &RegionNode) -> WizardOutcome {
    WizardOutcome::Complete {
        region_name: node.region_name.clone(),
        region_id: node.region_id.clone(),
    }
}

fn child_names(node: &RegionNode) -> Vec<String> {
    node.children.iter().map(|c| c.region_name.clone()).collect()
}

/// Advances the wizard by one user message.
///
/// `DataInconsistency` means the session's remembered ids no longer resolve
/// against the loaded tree (the snapshot changed underneath the dialogue);
/// the caller reports it and advises a reset.
pub fn advance(tree: &RegionTree, stage: &WizardStage, input: &str) -> AppResult<WizardOutcome> {
    match stage {
        WizardStage::AwaitingOblast => {
            let Some(oblast) = match_sibling(&tree.states, input) else {
                return Ok(WizardOutcome::NoMatch);
            };
            if oblast.is_leaf() {
                return Ok(complete(oblast));
            }
            Ok(WizardOutcome::Descend {
                options: child_names(oblast),
                next: WizardStage::AwaitingDistrict {
                    oblast_id: oblast.region_id.clone(),
                },
            })
        }

        WizardStage::AwaitingDistrict { oblast_id } => {
            let oblast = find_by_id(&tree.states, oblast_id)
                .ok_or_else(|| AppError::DataInconsistency(format!("oblast {} is gone from the tree", oblast_id)))?;
            // The session descended into this oblast, yet the reloaded tree
            // says it has no children: bind the oblast itself.
            if oblast.is_leaf() {
                return Ok(complete(oblast));
            }
            let Some(district) = match_sibling(&oblast.children, input) else {
                return Ok(WizardOutcome::NoMatch);
            };
            if district.is_leaf() {
                return Ok(complete(district));
            }
            Ok(WizardOutcome::Descend {
                options: child_names(district),
                next: WizardStage::AwaitingCity {
                    oblast_id: oblast.region_id.clone(),
                    district_id: district.region_id.clone(),
                    reprompts: 0,
                },
            })
        }

        WizardStage::AwaitingCity {
            oblast_id,
            district_id,
            reprompts,
        } => {
            let oblast = find_by_id(&tree.states, oblast_id)
                .ok_or_else(|| AppError::DataInconsistency(format!("oblast {} is gone from the tree", oblast_id)))?;
            let district = find_by_id(&oblast.children, district_id).ok_or_else(|| {
                AppError::DataInconsistency(format!("district {} is gone from oblast {}", district_id, oblast_id))
            })?;
            // District lost its cities between steps: bind the district.
            if district.is_leaf() {
                return Ok(complete(district));
            }
            let Some(city) = match_sibling(&district.children, input) else {
                return Ok(WizardOutcome::NoMatch);
            };
            if city.is_leaf() {
                return Ok(complete(city));
            }
            // A "city" with children is malformed upstream data. Re-prompt a
            // bounded number of times, then bind it anyway rather than trap
            // the user at this stage forever.
            if *reprompts >= MAX_CITY_REPROMPTS {
                return Ok(complete(city));
            }
            Ok(WizardOutcome::Malformed {
                region_name: city.region_name.clone(),
                next: WizardStage::AwaitingCity {
                    oblast_id: oblast_id.clone(),
                    district_id: district_id.clone(),
                    reprompts: reprompts + 1,
                },
            })
        }
    }
}

/// Names of the top-level regions, in tree order. Presented on flow entry.
pub fn oblast_names(tree: &RegionTree) -> Vec<String> {
    tree.states.iter().map(|n| n.region_name.clone()).collect()
}
