//! Action resolution - computing new player records from an action.
//!
//! `ActionResolver` never touches the store. It receives the records an
//! action involves, validates preconditions, and returns updated copies in a
//! `Resolution`. The engine is responsible for locking and committing.
//!
//! Each action comes in two forms: one taking an `ActionRng`, which checks
//! preconditions before drawing anything, and a `*_with_rolls` form that is
//! pure over pre-drawn rolls.

use crate::core::{ActionRng, EngineConfig, Player};
use crate::error::{EngineError, Result};
use crate::rules::{apply_progression, Advancement};

use super::{AttackRolls, HealRolls, JobRolls, Outcome, Resolution};

fn advancement_suffix(player: &Player, advancement: Advancement) -> String {
    match advancement {
        Advancement::None => String::new(),
        Advancement::LevelUp { level } => format!(" {} reached level {}!", player.username, level),
        Advancement::Prestige { prestige } => {
            format!(" {} reached prestige {}!", player.username, prestige)
        }
    }
}

fn award_points(player: &mut Player, points: u64) -> Advancement {
    player.points = player.points.saturating_add(points);
    apply_progression(player)
}

/// Resolves actions against player records.
pub struct ActionResolver;

impl ActionResolver {
    fn check_attack(actor: &Player, target: &Player) -> Result<()> {
        if actor.id == target.id {
            return Err(EngineError::SelfTarget(actor.id));
        }
        if actor.is_incapacitated() {
            return Err(EngineError::ActorIncapacitated(actor.id));
        }
        Ok(())
    }

    fn target_already_dead(actor: &Player, target: &Player) -> Resolution {
        Resolution {
            actor: actor.clone(),
            target: Some(target.clone()),
            outcome: Outcome::TargetAlreadyDead { target: target.id },
            message: format!("{} is already dead and cannot be attacked.", target.username),
        }
    }

    /// Attack `target`, drawing rolls only if the attack goes ahead.
    pub fn attack(
        actor: &Player,
        target: &Player,
        rng: &mut impl ActionRng,
        config: &EngineConfig,
    ) -> Result<Resolution> {
        Self::check_attack(actor, target)?;
        if target.is_incapacitated() {
            return Ok(Self::target_already_dead(actor, target));
        }
        let rolls = AttackRolls::draw(rng, config);
        Self::attack_with_rolls(actor, target, rolls, config)
    }

    /// Attack `target` with pre-drawn rolls.
    pub fn attack_with_rolls(
        actor: &Player,
        target: &Player,
        rolls: AttackRolls,
        config: &EngineConfig,
    ) -> Result<Resolution> {
        Self::check_attack(actor, target)?;
        if target.is_incapacitated() {
            return Ok(Self::target_already_dead(actor, target));
        }

        let mut attacker = actor.clone();
        let mut defender = target.clone();

        attacker.adjust_health(-rolls.self_damage);
        defender.adjust_health(-config.attack_damage);

        // The defender was alive on entry, so reaching zero is a knockout.
        let knocked_out = defender.is_incapacitated();
        if knocked_out {
            attacker.kills = attacker.kills.saturating_add(1);
        }

        let advancement = award_points(&mut attacker, config.action_points);

        let message = format!(
            "{a} attacked {d} and took {dmg} damage. {a} gained {pts} points.{suffix}",
            a = attacker.username,
            d = defender.username,
            dmg = rolls.self_damage,
            pts = config.action_points,
            suffix = advancement_suffix(&attacker, advancement),
        );

        Ok(Resolution {
            outcome: Outcome::Attacked {
                target: defender.id,
                self_damage: rolls.self_damage,
                knocked_out,
                points: config.action_points,
                advancement,
            },
            actor: attacker,
            target: Some(defender),
            message,
        })
    }

    /// Run a job, robbing one of `candidates` chosen at random.
    ///
    /// `candidates` must not contain the actor.
    pub fn job(
        actor: &Player,
        candidates: &[Player],
        rng: &mut impl ActionRng,
        config: &EngineConfig,
    ) -> Result<Resolution> {
        if actor.is_incapacitated() {
            return Err(EngineError::ActorIncapacitated(actor.id));
        }
        let rolls = JobRolls::draw(rng, config, candidates.len());
        let victim = rolls.victim.and_then(|index| candidates.get(index));
        Self::job_with_rolls(actor, victim, &rolls, config)
    }

    /// Run a job against an already chosen victim.
    ///
    /// `victim` is `None` when nobody else exists; that only matters if the
    /// actor survives the job's self damage.
    pub fn job_with_rolls(
        actor: &Player,
        victim: Option<&Player>,
        rolls: &JobRolls,
        config: &EngineConfig,
    ) -> Result<Resolution> {
        if actor.is_incapacitated() {
            return Err(EngineError::ActorIncapacitated(actor.id));
        }
        if victim.is_some_and(|v| v.id == actor.id) {
            return Err(EngineError::SelfTarget(actor.id));
        }

        let mut thief = actor.clone();
        thief.adjust_health(-rolls.self_damage);

        if thief.is_incapacitated() {
            let message = format!(
                "{} failed the job and took {} damage. They have died.",
                thief.username, rolls.self_damage
            );
            return Ok(Resolution {
                actor: thief,
                target: None,
                outcome: Outcome::DiedOnJob {
                    self_damage: rolls.self_damage,
                },
                message,
            });
        }

        let mut mark = victim.ok_or(EngineError::NoTargetsAvailable)?.clone();

        thief.money = thief.money.saturating_add(rolls.stolen);
        mark.money = mark.money.saturating_sub(rolls.stolen);

        let advancement = award_points(&mut thief, config.action_points);

        let message = format!(
            "{t} stole ${amt} from {v} and took {dmg} damage. {t} gained {pts} points.{suffix}",
            t = thief.username,
            amt = rolls.stolen,
            v = mark.username,
            dmg = rolls.self_damage,
            pts = config.action_points,
            suffix = advancement_suffix(&thief, advancement),
        );

        Ok(Resolution {
            outcome: Outcome::Stole {
                victim: mark.id,
                amount: rolls.stolen,
                self_damage: rolls.self_damage,
                points: config.action_points,
                advancement,
            },
            actor: thief,
            target: Some(mark),
            message,
        })
    }

    /// Look for food. Allowed at any health.
    pub fn heal(actor: &Player, rng: &mut impl ActionRng, config: &EngineConfig) -> Resolution {
        let rolls = HealRolls::draw(rng, config);
        Self::heal_with_rolls(actor, rolls, config)
    }

    /// Look for food with pre-drawn rolls.
    pub fn heal_with_rolls(actor: &Player, rolls: HealRolls, config: &EngineConfig) -> Resolution {
        let mut healed = actor.clone();

        if !rolls.found_food {
            let message = format!("{} did not find any food.", healed.username);
            return Resolution {
                actor: healed,
                target: None,
                outcome: Outcome::FoundNothing,
                message,
            };
        }

        healed.adjust_health(rolls.amount);
        let can_act = healed.health >= config.revive_threshold;

        let message = if can_act {
            format!(
                "{} found food and healed {} health. They are now alive and can perform actions again.",
                healed.username, rolls.amount
            )
        } else {
            format!(
                "{} found food and healed {} health. They need to heal up to {} health to perform actions.",
                healed.username, rolls.amount, config.revive_threshold
            )
        };

        Resolution {
            actor: healed,
            target: None,
            outcome: Outcome::Healed {
                amount: rolls.amount,
                can_act,
            },
            message,
        }
    }
}
