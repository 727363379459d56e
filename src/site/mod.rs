//! Landing page sections
//!
//! Static NetworkAI copy, addressable by the same anchors the navigation
//! bar links to.

use std::fmt;
use std::str::FromStr;

/// Brand name shown in the header and footer
pub const BRAND: &str = "NetworkAI";

/// Named page anchors, in page order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Home,
    Predictor,
    About,
    Contact,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Home,
        Section::Predictor,
        Section::About,
        Section::Contact,
    ];

    pub fn anchor(&self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Predictor => "predictor",
            Section::About => "about",
            Section::Contact => "contact",
        }
    }

    /// Navigation label
    pub fn nav_label(&self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::Predictor => "Predictor",
            Section::About => "About",
            Section::Contact => "Contact",
        }
    }

    /// Section content as titled blocks
    pub fn content(&self) -> Vec<Block> {
        match self {
            Section::Home => hero(),
            Section::Predictor => predictor_intro(),
            Section::About => about(),
            Section::Contact => contact(),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.anchor())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let anchor = s.trim().trim_start_matches('#').to_lowercase();
        Section::ALL
            .iter()
            .copied()
            .find(|section| section.anchor() == anchor)
            .ok_or_else(|| format!("Unknown section: {}", s))
    }
}

/// A heading with paragraphs and bullet items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub heading: &'static str,
    pub paragraphs: Vec<&'static str>,
    pub items: Vec<(&'static str, &'static str)>,
}

fn hero() -> Vec<Block> {
    vec![Block {
        heading: "Predict Network Issues",
        paragraphs: vec![
            "Advanced AI-powered network monitoring that predicts issues before they impact your business. Stay ahead of connectivity problems with real-time analysis.",
        ],
        items: vec![
            ("Proactive Monitoring", "Detect network issues before they cause downtime"),
            ("Real-time Analysis", "Get instant predictions with our advanced AI models"),
            ("Performance Insights", "Understand network patterns and optimize performance"),
        ],
    }]
}

fn predictor_intro() -> Vec<Block> {
    vec![Block {
        heading: "Network Health Predictor",
        paragraphs: vec![
            "Enter your network metrics to get an AI-powered prediction of potential issues",
        ],
        items: Vec::new(),
    }]
}

fn about() -> Vec<Block> {
    vec![
        Block {
            heading: "About NetworkAI",
            paragraphs: vec![
                "Cutting-edge machine learning technology that revolutionizes network monitoring and predictive maintenance for modern infrastructure.",
            ],
            items: Vec::new(),
        },
        Block {
            heading: "AI-Powered Network Intelligence",
            paragraphs: vec![
                "Our advanced machine learning algorithms analyze key network metrics including latency, packet loss, jitter, and bandwidth usage to predict potential issues before they impact your operations.",
                "Built on years of network data analysis and continuous learning, NetworkAI provides enterprise-grade predictions with industry-leading accuracy rates.",
            ],
            items: vec![
                ("Real-time network health monitoring", ""),
                ("Predictive issue detection", ""),
                ("Automated performance optimization", ""),
            ],
        },
        Block {
            heading: "Capabilities",
            paragraphs: Vec::new(),
            items: vec![
                ("Machine Learning", "Advanced neural networks trained on massive network datasets"),
                ("Big Data", "Processing millions of network events for accurate predictions"),
                ("Security", "Enterprise-grade security with encrypted data transmission"),
                ("Performance", "Sub-second response times with 99.9% uptime guarantee"),
            ],
        },
        Block {
            heading: "Meet the Developer",
            paragraphs: vec![
                "Network AI Specialist. Machine Learning Engineer & Network Infrastructure Expert.",
                "With over a decade of experience in network infrastructure and machine learning, I've dedicated my career to solving complex connectivity challenges through innovative AI solutions. NetworkAI represents the culmination of years of research and development in predictive network analytics.",
            ],
            items: Vec::new(),
        },
    ]
}

fn contact() -> Vec<Block> {
    vec![
        Block {
            heading: BRAND,
            paragraphs: vec![
                "Advanced AI-powered network monitoring and predictive analytics platform. Helping businesses stay ahead of network issues with cutting-edge machine learning.",
            ],
            items: Vec::new(),
        },
        Block {
            heading: "Contact",
            paragraphs: Vec::new(),
            items: vec![
                ("Email", "contact@networkai.com"),
                ("Phone", "+1 (555) 123-4567"),
                ("Location", "San Francisco, CA"),
            ],
        },
        Block {
            heading: "Legal",
            paragraphs: vec!["© 2025 NetworkAI. All rights reserved."],
            items: vec![
                ("Privacy Policy", ""),
                ("Terms of Service", ""),
                ("Cookie Policy", ""),
            ],
        },
    ]
}
