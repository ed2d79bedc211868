//! Markdown serialization of a statblock.
//!
//! Output uses a fixed lightweight convention: `##` headings, `**bold**`,
//! `*italic*` attack-type tags, and `___` horizontal rules. The text is
//! meant for direct display or copy-to-clipboard, not for strict parsers.

use tracing::warn;

use statforge_domain::{
    calculate_dependent_stats, format_signed, Ability, ActionKind, BonusExpr, DamageFormula,
    DerivedStats, DomainError, MonsterAction, MonsterStatblock, ProficiencyLevel, Ruleset, Skill,
};

/// Render a statblock record into markdown text.
///
/// Derived fields are recomputed from the raw record, so callers never need
/// to refresh them before rendering. The record itself is read-only here.
/// The only failure is an off-ladder challenge rating surfacing from the
/// experience lookup.
pub fn render_statblock(
    monster: &MonsterStatblock,
    rules: &Ruleset,
) -> Result<String, DomainError> {
    let derived = calculate_dependent_stats(monster, rules);
    let mut out = String::new();

    push_header(&mut out, monster);
    push_defense_block(&mut out, monster);
    push_ability_table(&mut out, monster, rules);
    push_trait_lines(&mut out, monster, rules, &derived)?;

    if let Some(desc) = &monster.desc {
        out.push_str(desc);
        out.push_str("\n\n");
    }

    push_action_section(&mut out, None, None, &monster.special_abilities, monster, rules);
    push_action_section(&mut out, Some("Actions"), None, &monster.actions, monster, rules);
    push_action_section(
        &mut out,
        Some("Bonus Actions"),
        None,
        &monster.bonus_actions,
        monster,
        rules,
    );
    push_action_section(
        &mut out,
        Some("Reactions"),
        None,
        &monster.reactions,
        monster,
        rules,
    );
    push_action_section(
        &mut out,
        Some("Legendary Actions"),
        monster.legendary_desc.as_deref(),
        &monster.legendary_actions,
        monster,
        rules,
    );
    push_action_section(
        &mut out,
        Some("Mythic Actions"),
        monster.mythic_desc.as_deref(),
        &monster.mythic_actions,
        monster,
        rules,
    );

    Ok(out)
}

fn push_header(out: &mut String, monster: &MonsterStatblock) {
    out.push_str(&format!("## {}\n", monster.name));

    let mut tagline = String::new();
    if let Some(size) = &monster.size {
        tagline.push_str(size);
    }
    if let Some(creature_type) = &monster.creature_type {
        if !tagline.is_empty() {
            tagline.push(' ');
        }
        tagline.push_str(creature_type);
    }
    if let Some(subtype) = &monster.subtype {
        tagline.push_str(&format!(" ({})", subtype));
    }
    if let Some(alignment) = &monster.alignment {
        if !tagline.is_empty() {
            tagline.push_str(", ");
        }
        tagline.push_str(alignment);
    }
    if !tagline.is_empty() {
        out.push_str(&format!("*{}*\n", tagline));
    }
    out.push_str("___\n");
}

fn push_defense_block(out: &mut String, monster: &MonsterStatblock) {
    if let Some(armor_class) = monster.armor_class {
        match &monster.armor_desc {
            Some(desc) => {
                out.push_str(&format!("**Armor Class** {} ({})\n", armor_class, desc))
            }
            None => out.push_str(&format!("**Armor Class** {}\n", armor_class)),
        }
    }
    if let Some(hit_points) = monster.hit_points {
        match &monster.hit_dice {
            Some(dice) => out.push_str(&format!("**Hit Points** {} ({})\n", hit_points, dice)),
            None => out.push_str(&format!("**Hit Points** {}\n", hit_points)),
        }
    }

    let speed = speed_string(monster);
    if !speed.is_empty() {
        out.push_str(&format!("**Speed** {}\n", speed));
    }
    out.push_str("___\n");
}

/// Walk speed renders bare ("30 ft."); other modes are named; `hover` is the
/// bare keyword at the end.
fn speed_string(monster: &MonsterStatblock) -> String {
    let speed = &monster.speed;
    let mut parts = Vec::new();
    if let Some(walk) = speed.walk {
        parts.push(format!("{} ft.", walk));
    }
    for (name, value) in [
        ("climb", speed.climb),
        ("swim", speed.swim),
        ("fly", speed.fly),
        ("burrow", speed.burrow),
    ] {
        if let Some(feet) = value {
            parts.push(format!("{} {} ft.", name, feet));
        }
    }
    if speed.hover {
        parts.push("hover".to_string());
    }
    parts.join(", ")
}

fn push_ability_table(out: &mut String, monster: &MonsterStatblock, rules: &Ruleset) {
    out.push_str("|STR|DEX|CON|INT|WIS|CHA|\n");
    out.push_str("|:--:|:--:|:--:|:--:|:--:|:--:|\n");
    let cells: Vec<String> = Ability::ALL
        .into_iter()
        .map(|ability| {
            let score = monster.abilities.get(ability);
            format!("{} ({})", score, format_signed(rules.ability_modifier(score)))
        })
        .collect();
    out.push_str(&format!("|{}|\n", cells.join("|")));
    out.push_str("___\n");
}

fn push_trait_lines(
    out: &mut String,
    monster: &MonsterStatblock,
    rules: &Ruleset,
    derived: &DerivedStats,
) -> Result<(), DomainError> {
    // Only proficient saves appear; the line disappears with the last one
    let saves: Vec<String> = Ability::ALL
        .into_iter()
        .filter(|ability| monster.is_save_proficient(*ability))
        .map(|ability| format!("{} {}", ability.label(), format_signed(derived.save(ability))))
        .collect();
    if !saves.is_empty() {
        out.push_str(&format!("**Saving Throws** {}\n", saves.join(", ")));
    }

    let skills: Vec<String> = Skill::ALL
        .into_iter()
        .filter(|skill| monster.skill_proficiency(*skill) != ProficiencyLevel::None)
        .map(|skill| format!("{} {}", skill.label(), format_signed(derived.skill(skill))))
        .collect();
    if !skills.is_empty() {
        out.push_str(&format!("**Skills** {}\n", skills.join(", ")));
    }

    for (label, joined) in [
        ("Damage Vulnerabilities", &derived.damage_vulnerabilities),
        ("Damage Resistances", &derived.damage_resistances),
        ("Damage Immunities", &derived.damage_immunities),
        ("Condition Immunities", &derived.condition_immunities),
    ] {
        if !joined.is_empty() {
            out.push_str(&format!("**{}** {}\n", label, joined));
        }
    }

    out.push_str(&format!("**Senses** {}\n", derived.senses));

    if let Some(languages) = &monster.languages {
        out.push_str(&format!("**Languages** {}\n", languages));
    }

    let cr = monster.challenge_rating;
    let xp = rules.xp_for_cr(cr)?;
    let prof = rules.proficiency_bonus(cr);
    out.push_str(&format!(
        "**Challenge** {} ({} XP) **Proficiency Bonus** {}\n",
        cr,
        xp,
        format_signed(prof)
    ));
    out.push_str("___\n");
    Ok(())
}

fn push_action_section(
    out: &mut String,
    title: Option<&str>,
    section_desc: Option<&str>,
    actions: &[MonsterAction],
    monster: &MonsterStatblock,
    rules: &Ruleset,
) {
    if actions.is_empty() {
        return;
    }
    if let Some(title) = title {
        out.push_str(&format!("### {}\n", title));
    }
    if let Some(desc) = section_desc {
        out.push_str(desc);
        out.push('\n');
    }
    for action in actions {
        if action.is_flavor() {
            out.push_str(&format!("**{}.** {}\n", action.name, action.desc));
        } else {
            out.push_str(&attack_line(action, monster, rules));
        }
    }
    out.push('\n');
}

fn attack_line(action: &MonsterAction, monster: &MonsterStatblock, rules: &Ruleset) -> String {
    let mut line = format!("**{}.**", action.name);
    if let Some(kind) = action.kind {
        line.push_str(&format!(" *{}:*", kind));
    }

    let mut parts = Vec::new();
    if let Some(bonus_text) = &action.attack_bonus {
        let to_hit = BonusExpr::parse(bonus_text)
            .map(|expr| {
                format_signed(expr.evaluate(&monster.abilities, monster.challenge_rating, rules))
            })
            .unwrap_or_else(|| bonus_text.clone());
        parts.push(format!("{} to hit", to_hit));
    }
    if let Some(range) = range_phrase(action) {
        parts.push(range);
    }
    if let Some(targets) = &action.targets {
        parts.push(targets.trim_end_matches('.').to_string());
    }
    if !parts.is_empty() {
        line.push_str(&format!(" {}.", parts.join(", ")));
    }

    if !action.damage.is_empty() {
        let segments: Vec<String> = action
            .damage
            .iter()
            .map(|roll| {
                let formula = DamageFormula::resolve(&roll.formula, &monster.abilities, rules);
                let amount = match formula.average() {
                    Some(average) => format!("{} ({})", average, formula.text()),
                    None => formula.text().to_string(),
                };
                if roll.damage_type.is_empty() {
                    amount
                } else {
                    format!("{} {}", amount, roll.damage_type)
                }
            })
            .collect();
        line.push_str(&format!(" *Hit:* {}.", segments.join(" plus ")));
    }

    if let Some(effect) = &action.effect {
        line.push_str(&format!(" {}", effect));
    }
    if !action.desc.is_empty() {
        line.push_str(&format!(" {}", action.desc));
    }
    line.push('\n');
    line
}

/// Range phrase for an attack, chosen by its kind.
fn range_phrase(action: &MonsterAction) -> Option<String> {
    let reach = action.reach.unwrap_or(0);
    let short = action.short_range.unwrap_or(0);
    let long = action.long_range.unwrap_or(0);
    match action.kind {
        Some(ActionKind::MeleeWeapon) | Some(ActionKind::MeleeSpell) => {
            Some(format!("reach {} ft.", reach))
        }
        Some(ActionKind::RangedWeapon) => Some(format!("ranged {}/{} ft.", short, long)),
        Some(ActionKind::RangedSpell) => Some(format!("ranged {} ft.", short)),
        Some(ActionKind::MeleeOrRanged) => Some(format!(
            "reach {} ft. or ranged {}/{} ft.",
            reach, short, long
        )),
        Some(ActionKind::Ability) => None,
        None => {
            warn!(action = %action.name, "Attack has no action kind; omitting range phrase");
            None
        }
    }
}
