/// One full-screen panel of the preview.
pub struct Section {
    pub title: &'static str,
    /// Each line is one reveal child.
    pub lines: &'static [&'static str],
}

const LANDING: &[Section] = &[
    Section {
        title: "Professional Land Surveying",
        lines: &[
            "Precision surveying with modern instruments",
            "Boundaries and construction layouts you can rely on",
            "[ Get Free Quote ]   [ Our Services ]",
        ],
    },
    Section {
        title: "Trusted by Thousands",
        lines: &[
            "2500+  projects completed",
            "15+    years of experience",
            "98+    client satisfaction",
            "50+    team members",
        ],
    },
    Section {
        title: "Our Services",
        lines: &[
            "Boundary surveys",
            "Topographic surveys",
            "Construction layout",
            "ALTA/NSPS surveys",
            "Subdivision platting",
            "GPS & GIS services",
        ],
    },
    Section {
        title: "Why Choose Us",
        lines: &[
            "Licensed and insured",
            "Current GPS, robotic total station and drone equipment",
            "Fast turnaround",
        ],
    },
    Section {
        title: "Ready to Get Started?",
        lines: &["Call us", "Email us", "Visit us"],
    },
];

const FILLER: Section = Section {
    title: "More",
    lines: &["Additional section"],
};

/// `count` sections: the landing page panels, padded with filler panels.
pub fn sections(count: usize) -> Vec<&'static Section> {
    (0..count)
        .map(|i| LANDING.get(i).unwrap_or(&FILLER))
        .collect()
}
