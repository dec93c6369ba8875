//! Static page content: biography, timelines, and the project showcase.

pub const SITE_NAME: &str = "Maren Ellis";

pub const BIO: &str = "Product engineer and occasional founder. I build small, \
dependable software for organizations that measure success in people helped \
rather than pageviews, and I write about what breaks along the way.";

#[derive(Clone, Copy, PartialEq)]
pub struct ProjectItem {
    pub id: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub tags: &'static [&'static str],
    pub accent: &'static str,
}

pub const PROJECTS: &[ProjectItem] = &[
    ProjectItem {
        id: "fieldnotes",
        title: "Fieldnotes",
        summary: "Offline-first case notes for outreach workers, synced when a connection shows up.",
        tags: &["offline-first", "sync", "mobile"],
        accent: "moss",
    },
    ProjectItem {
        id: "ledgerlight",
        title: "Ledgerlight",
        summary: "Plain-language grant accounting for small nonprofits; built after watching three of them drown in spreadsheets.",
        tags: &["finance", "reporting"],
        accent: "amber",
    },
    ProjectItem {
        id: "relay",
        title: "Relay",
        summary: "Volunteer shift scheduling that survives no-shows, swaps, and the occasional snowstorm.",
        tags: &["scheduling", "sms"],
        accent: "sky",
    },
    ProjectItem {
        id: "quietboard",
        title: "Quietboard",
        summary: "A status board for incident rooms that shows less, on purpose.",
        tags: &["ops", "dashboards"],
        accent: "slate",
    },
    ProjectItem {
        id: "porchlight",
        title: "Porchlight",
        summary: "Neighborhood mutual-aid matching, from request to doorstep in under a day.",
        tags: &["matching", "community"],
        accent: "rose",
    },
];

#[derive(Clone, Copy, PartialEq)]
pub struct TimelineEntry {
    pub period: &'static str,
    pub title: &'static str,
    pub organization: &'static str,
    pub detail: &'static str,
}

pub const WORK: &[TimelineEntry] = &[
    TimelineEntry {
        period: "2021 — now",
        title: "Principal Engineer",
        organization: "Harbor Collective",
        detail: "Infrastructure and product for a portfolio of civic-tech teams.",
    },
    TimelineEntry {
        period: "2017 — 2021",
        title: "Engineering Lead",
        organization: "Brightline Labs",
        detail: "Grew the data platform team from two people to eleven; shipped the second product.",
    },
    TimelineEntry {
        period: "2013 — 2017",
        title: "Software Engineer",
        organization: "Northway",
        detail: "Logistics routing, then payments, then whatever was on fire.",
    },
];

pub const EDUCATION: &[TimelineEntry] = &[
    TimelineEntry {
        period: "2011 — 2013",
        title: "M.S. Computer Science",
        organization: "University of Washington",
        detail: "Distributed systems track.",
    },
    TimelineEntry {
        period: "2007 — 2011",
        title: "B.S. Mathematics",
        organization: "Reed College",
        detail: "Thesis on combinatorial optimization.",
    },
];

pub const PHILANTHROPY: &[TimelineEntry] = &[
    TimelineEntry {
        period: "2019 — now",
        title: "Board Member",
        organization: "Open Door Shelter Network",
        detail: "Technology strategy and the annual systems audit.",
    },
    TimelineEntry {
        period: "2016 — now",
        title: "Volunteer Maintainer",
        organization: "Code for Rainier",
        detail: "Keeping a dozen small civic tools alive between brigade nights.",
    },
];
