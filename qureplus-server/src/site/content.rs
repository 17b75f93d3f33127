//! Static copy for the informational pages.

pub struct Highlight {
    pub title: &'static str,
    pub description: &'static str,
}

pub struct StageCard {
    pub title: &'static str,
    pub description: &'static str,
    pub severity: &'static str,
}

pub struct Treatment {
    pub title: &'static str,
    pub description: &'static str,
    pub benefits: [&'static str; 4],
    pub severity: &'static str,
    pub duration: &'static str,
    pub recovery: &'static str,
}

pub const NAV: [(&str, &str); 5] = [
    ("Home", "#home"),
    ("About", "#about"),
    ("Treatments", "#treatments"),
    ("How it Works", "#how-it-works"),
    ("Contact", "#contact"),
];

pub const HERO_TITLE: &str = "AI-Powered Varicose Vein Analysis";
pub const HERO_TEXT: &str = "Get instant, accurate analysis of varicose veins using advanced AI technology. \
Upload your leg image and receive professional-grade diagnostic insights in seconds.";

pub const FEATURES: [Highlight; 6] = [
    Highlight {
        title: "95% Accuracy",
        description: "Clinically validated AI model trained on thousands of medical images",
    },
    Highlight {
        title: "Instant Results",
        description: "Get comprehensive analysis in under 2 seconds",
    },
    Highlight {
        title: "Privacy First",
        description: "Your images are processed securely and never stored",
    },
    Highlight {
        title: "Expert Team",
        description: "Developed by leading medical professionals and AI researchers",
    },
    Highlight {
        title: "Medical Grade",
        description: "Meets healthcare industry standards for diagnostic tools",
    },
    Highlight {
        title: "24/7 Available",
        description: "Access professional-grade analysis anytime, anywhere",
    },
];

pub const STAGES: [StageCard; 5] = [
    StageCard {
        title: "Spider Veins",
        description: "Thin, web-like veins on skin surface",
        severity: "Mild",
    },
    StageCard {
        title: "Reticular Veins",
        description: "Blue-green veins 1-3mm in diameter",
        severity: "Mild-Moderate",
    },
    StageCard {
        title: "Varicose Veins",
        description: "Bulging, rope-like veins ≥3mm",
        severity: "Moderate",
    },
    StageCard {
        title: "Skin Changes",
        description: "Pigmentation, eczema, inflammation",
        severity: "Moderate-Severe",
    },
    StageCard {
        title: "Ulcers",
        description: "Open, non-healing wounds",
        severity: "Severe",
    },
];

pub const TREATMENTS: [Treatment; 4] = [
    Treatment {
        title: "Laser Therapy",
        description: "Advanced laser treatment that closes affected veins with minimal discomfort and quick recovery.",
        benefits: ["Minimally invasive", "Quick procedure", "High success rate", "Minimal scarring"],
        severity: "Mild to Moderate",
        duration: "30-45 minutes",
        recovery: "1-2 days",
    },
    Treatment {
        title: "Sclerotherapy",
        description: "Injection of a solution that causes veins to collapse and fade away over time.",
        benefits: ["Non-surgical", "Effective for spider veins", "Outpatient procedure", "Proven results"],
        severity: "Mild to Moderate",
        duration: "15-30 minutes",
        recovery: "2-3 days",
    },
    Treatment {
        title: "Radiofrequency Ablation",
        description: "Uses radiofrequency energy to heat and close problematic veins safely and effectively.",
        benefits: ["Less bruising", "Faster healing", "Local anesthesia", "High precision"],
        severity: "Moderate to Severe",
        duration: "45-60 minutes",
        recovery: "3-5 days",
    },
    Treatment {
        title: "Compression Therapy",
        description: "Specialized stockings that improve circulation and reduce symptoms of varicose veins.",
        benefits: ["Non-invasive", "Immediate relief", "Prevents progression", "Daily use"],
        severity: "All levels",
        duration: "Ongoing",
        recovery: "None required",
    },
];

pub const PREVENTION_TIPS: [Highlight; 4] = [
    Highlight {
        title: "Regular Exercise",
        description: "Walking, swimming, and cycling improve circulation and strengthen leg muscles.",
    },
    Highlight {
        title: "Healthy Weight",
        description: "Maintaining optimal weight reduces pressure on leg veins and improves circulation.",
    },
    Highlight {
        title: "Leg Elevation",
        description: "Elevating legs above heart level for 15 minutes daily helps blood flow back to the heart.",
    },
    Highlight {
        title: "Avoid Prolonged Standing",
        description: "Take breaks to move around if your job requires long periods of standing or sitting.",
    },
];

pub const STEPS: [Highlight; 3] = [
    Highlight {
        title: "Upload Image",
        description: "Take a clear photo of your leg and upload it to our secure platform",
    },
    Highlight {
        title: "AI Analysis",
        description: "Our advanced AI analyzes the image for signs of varicose veins",
    },
    Highlight {
        title: "Get Results",
        description: "Receive detailed analysis with probability and stage classification",
    },
];

pub const CONTACT_PHONE: &str = "+91 7093765543";
pub const CONTACT_EMAIL: &str = "contact@qureplus.com";
pub const CONTACT_ADDRESS: [&str; 2] = ["123 Healthcare Street", "Bangalore, Karnataka 560001"];

pub const MEDICAL_DISCLAIMER: &str = "This analysis is for informational purposes only and should not \
replace professional medical consultation. Please consult with a healthcare provider for proper \
diagnosis and treatment.";
