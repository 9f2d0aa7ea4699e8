use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use mcfunction_arguments::{ActorKind, CommandContext};
use mcfunction_grammar::NodePath;
use mcfunction_nbt::NbtTarget;


/// Context facts implied by reaching certain nodes of the command tree, such as
/// `summon <entity> <pos> <nbt>` writing the NBT of the summoned entity.
///
/// Loaded from a JSON tree of the form
/// `{ "children": { "summon": { "children": { "entity": { "context": {...} } } } } }`,
/// where each `context` is a [`ContextPatch`].
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct ContextRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    context:  Option<ContextPatch>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    children: IndexMap<String, ContextRules>,
}

/// Changes made to the context when a node is matched.
///
/// String values may contain `%s` placeholders, replaced in order by the texts of the
/// nodes matched so far on the line, or `%N$s` for the text of the `N`th node.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct ContextPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor:      Option<ActorKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbt_target: Option<NbtTarget>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra:      Map<String, Value>,
}

impl ContextRules {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
            .inspect_err(|err| log::warn!("Error parsing context rules: {err}"))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.context.is_none() && self.children.is_empty()
    }

    /// The patch for exactly the node at `path`, if any.
    pub fn patch(&self, path: &NodePath) -> Option<&ContextPatch> {
        path.segments()
            .iter()
            .try_fold(self, |rules, segment| rules.children.get(segment))?
            .context
            .as_ref()
    }

    /// Apply the patch for `path`, if there is one, with `args` as the texts of the nodes
    /// matched so far.
    pub(crate) fn apply(
        &self,
        path:    &NodePath,
        context: CommandContext,
        args:    &[&str],
    ) -> CommandContext {
        match self.patch(path) {
            Some(patch) => {
                log::trace!("Applying context rule at '{path}'");
                patch.apply(context, args)
            }
            None => context,
        }
    }
}

impl ContextPatch {
    pub fn apply(&self, mut context: CommandContext, args: &[&str]) -> CommandContext {
        if let Some(actor) = self.actor {
            context.set_actor(actor);
        }

        if let Some(target) = &self.nbt_target {
            let id = target.id.as_deref().map(|id| substitute(id, args));
            context.set_nbt_target(Some(NbtTarget::new(target.kind, id)));
        }

        for (key, value) in &self.extra {
            context.insert_extra(key.clone(), substitute_value(value, args));
        }

        context
    }
}

fn substitute_value(value: &Value, args: &[&str]) -> Value {
    match value {
        Value::String(string) => Value::String(substitute(string, args)),
        Value::Array(values)  => values.iter().map(|value| substitute_value(value, args)).collect(),
        Value::Object(map)    => Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), substitute_value(value, args)))
                .collect(),
        ),
        Value::Null | Value::Bool(_) | Value::Number(_) => value.clone(),
    }
}

/// Replace `%s` with the next of `args`, `%N$s` with the `N`th (counting from 1),
/// and `%%` with `%`. Placeholders without a matching argument become empty.
fn substitute(template: &str, args: &[&str]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut next_arg = 0;
    let mut rest = template;

    while let Some(percent) = rest.find('%') {
        output.push_str(&rest[..percent]);
        rest = &rest[percent + 1..];

        if let Some(after) = rest.strip_prefix('s') {
            output.push_str(args.get(next_arg).copied().unwrap_or_default());
            next_arg += 1;
            rest = after;
        } else if let Some(after) = rest.strip_prefix('%') {
            output.push('%');
            rest = after;
        } else {
            let digits = rest.find(|ch: char| !ch.is_ascii_digit()).unwrap_or(rest.len());
            let position = rest[..digits].parse::<usize>().ok();

            match (position, rest[digits..].strip_prefix("$s")) {
                (Some(position), Some(after)) => {
                    let arg = position.checked_sub(1).and_then(|index| args.get(index));
                    output.push_str(arg.copied().unwrap_or_default());
                    rest = after;
                }
                _ => output.push('%'),
            }
        }
    }

    output.push_str(rest);
    output
}


#[cfg(test)]
mod tests {
    use mcfunction_nbt::NbtTargetKind;

    use super::*;


    const RULES: &str = r#"{
        "children": {
            "summon": {
                "children": {
                    "entity": {
                        "context": { "nbt_target": { "kind": "entity", "id": "%2$s" } }
                    }
                }
            },
            "execute": {
                "children": {
                    "as": {
                        "context": { "actor": "entity", "extra": { "selector": "%s %s" } }
                    }
                }
            }
        }
    }"#;

    #[test]
    fn summon_target() {
        let rules = ContextRules::from_json(RULES).unwrap();
        let path: NodePath = ["summon", "entity"].into_iter().collect();

        let context = rules.apply(&path, CommandContext::new(), &["summon", "minecraft:area_effect_cloud"]);
        let target = context.nbt_target().unwrap();
        assert_eq!(target.kind, NbtTargetKind::Entity);
        assert_eq!(target.id.as_deref(), Some("minecraft:area_effect_cloud"));
    }

    #[test]
    fn unmatched_paths() {
        let rules = ContextRules::from_json(RULES).unwrap();
        let path: NodePath = ["summon"].into_iter().collect();
        assert!(rules.patch(&path).is_none());

        let path: NodePath = ["kill", "targets"].into_iter().collect();
        let context = CommandContext::new();
        assert!(rules.apply(&path, context.clone(), &[]).ptr_eq(&context));
    }

    #[test]
    fn actor_and_extra() {
        let rules = ContextRules::from_json(RULES).unwrap();
        let path: NodePath = ["execute", "as"].into_iter().collect();

        let context = rules.apply(&path, CommandContext::new(), &["execute", "as"]);
        assert_eq!(context.actor(), ActorKind::Entity);
        assert_eq!(context.get_extra("selector"), Some(&Value::from("execute as")));
    }

    #[test]
    fn placeholders() {
        assert_eq!(substitute("%s:%s", &["a", "b"]), "a:b");
        assert_eq!(substitute("%2$s then %1$s", &["a", "b"]), "b then a");
        assert_eq!(substitute("100%% %s", &["done"]), "100% done");
        assert_eq!(substitute("%s %s", &["only"]), "only ");
        assert_eq!(substitute("%0$s%x", &["a"]), "%x");
    }
}
