//! Structural comparison of JSON snapshots.
//!
//! Walks two rendered graphs in parallel and reports the first path at
//! which they disagree, plus a line diff renderer for full reports.

use serde_json::Value as Json;

/// The first point at which two snapshots disagree.
#[derive(Clone, Debug, PartialEq)]
pub struct Divergence {
    /// Dotted path of the differing value; empty for the root.
    pub path: String,
    /// Value in the earlier snapshot (`null` if absent).
    pub before: Json,
    /// Value in the later snapshot (`null` if absent).
    pub after: Json,
}

/// Find the first divergence between `before` and `after`, in document
/// order of `before` (keys only present in `after` come last).
pub fn first_divergence(before: &Json, after: &Json) -> Option<Divergence> {
    walk(before, after, String::new())
}

fn walk(before: &Json, after: &Json, path: String) -> Option<Divergence> {
    match (before, after) {
        (Json::Object(b), Json::Object(a)) => {
            for (key, bv) in b {
                match a.get(key) {
                    None => {
                        return Some(Divergence {
                            path: join(&path, key),
                            before: bv.clone(),
                            after: Json::Null,
                        })
                    }
                    Some(av) if av != bv => return walk(bv, av, join(&path, key)),
                    Some(_) => {}
                }
            }
            a.iter()
                .find(|(key, _)| !b.contains_key(*key))
                .map(|(key, av)| Divergence {
                    path: join(&path, key),
                    before: Json::Null,
                    after: av.clone(),
                })
        }
        (Json::Array(b), Json::Array(a)) => {
            if let Some(i) = (0..b.len().min(a.len())).find(|&i| b[i] != a[i]) {
                return walk(&b[i], &a[i], join(&path, &i.to_string()));
            }
            if b.len() != a.len() {
                let i = b.len().min(a.len());
                return Some(Divergence {
                    path: join(&path, &i.to_string()),
                    before: b.get(i).cloned().unwrap_or(Json::Null),
                    after: a.get(i).cloned().unwrap_or(Json::Null),
                });
            }
            None
        }
        _ if before == after => None,
        _ => Some(Divergence {
            path,
            before: before.clone(),
            after: after.clone(),
        }),
    }
}

fn join(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{path}.{segment}")
    }
}

/// Render a unified-style line diff of two pretty-printed snapshots.
pub fn render_diff(before: &Json, after: &Json) -> String {
    let left = serde_json::to_string_pretty(before).unwrap_or_default();
    let right = serde_json::to_string_pretty(after).unwrap_or_default();
    let mut out = String::new();
    for line in diff::lines(&left, &right) {
        let (mark, text) = match line {
            diff::Result::Left(l) => ('-', l),
            diff::Result::Right(r) => ('+', r),
            diff::Result::Both(l, _) => (' ', l),
        };
        out.push(mark);
        out.push_str(text);
        out.push('\n');
    }
    out
}
