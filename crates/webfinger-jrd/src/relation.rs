use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownRelation;

/// Semantic category a JRD link is indexed under.
///
/// The set is closed: links whose `rel` does not map onto one of these are
/// dropped when a response is indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Avatar,
    RemoteStorage,
    Blog,
    Vcard,
    Updates,
    Share,
    Profile,
    Webfist,
    Camlistore,
}

impl Relation {
    /// Every relation, in canonical order.
    pub const ALL: [Relation; 9] = [
        Relation::Avatar,
        Relation::RemoteStorage,
        Relation::Blog,
        Relation::Vcard,
        Relation::Updates,
        Relation::Share,
        Relation::Profile,
        Relation::Webfist,
        Relation::Camlistore,
    ];

    /// Short key used in the index and accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Relation::Avatar => "avatar",
            Relation::RemoteStorage => "remotestorage",
            Relation::Blog => "blog",
            Relation::Vcard => "vcard",
            Relation::Updates => "updates",
            Relation::Share => "share",
            Relation::Profile => "profile",
            Relation::Webfist => "webfist",
            Relation::Camlistore => "camlistore",
        }
    }

    /// Map a raw JRD `rel` value (a URI or a short token) to its relation.
    pub fn from_rel(rel: &str) -> Option<Relation> {
        let relation = match rel {
            "http://webfist.org/spec/rel" => Relation::Webfist,
            "http://webfinger.net/rel/avatar" => Relation::Avatar,
            "remotestorage"
            | "remoteStorage"
            | "http://tools.ietf.org/id/draft-dejong-remotestorage" => Relation::RemoteStorage,
            "http://www.packetizer.com/rel/share" => Relation::Share,
            "http://webfinger.net/rel/profile-page" | "me" => Relation::Profile,
            "vcard" => Relation::Vcard,
            "blog" | "http://packetizer.com/rel/blog" => Relation::Blog,
            "http://schemas.google.com/g/2010#updates-from" => Relation::Updates,
            "https://camlistore.org/rel/server" => Relation::Camlistore,
            _ => return None,
        };
        Some(relation)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relation {
    type Err = UnknownRelation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Relation::ALL
            .into_iter()
            .find(|relation| relation.as_str() == s)
            .ok_or_else(|| UnknownRelation(s.to_string()))
    }
}
