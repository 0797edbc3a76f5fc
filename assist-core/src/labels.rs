//! Badge styling for backend-supplied category and work-type labels.
//!
//! The backend may introduce new labels without a client redeploy, so
//! these are open lookup tables with a neutral default, not closed enums.

/// Display styling for one label: a Tailwind color class pair and an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeStyle {
    pub color: &'static str,
    pub icon: &'static str,
}

const DEFAULT_BADGE: BadgeStyle =
    BadgeStyle { color: "bg-gray-100 text-gray-800", icon: "📋" };

/// Styling for a failure category (電気/機械/PC/...). Unrecognized or
/// missing labels get the neutral badge.
pub fn category_badge(category: Option<&str>) -> BadgeStyle {
    match category {
        Some("電気") => BadgeStyle { color: "bg-yellow-100 text-yellow-800", icon: "⚡" },
        Some("機械") => BadgeStyle { color: "bg-blue-100 text-blue-800", icon: "⚙️" },
        Some("PC") => BadgeStyle { color: "bg-green-100 text-green-800", icon: "💻" },
        Some("配管") => BadgeStyle { color: "bg-purple-100 text-purple-800", icon: "🔧" },
        _ => DEFAULT_BADGE,
    }
}

/// Styling for a work type. 重大故障 gets the loud red treatment.
pub fn work_type_badge(work_type: Option<&str>) -> BadgeStyle {
    match work_type {
        Some("重大故障") => {
            BadgeStyle { color: "bg-red-100 text-red-800 font-medium", icon: "🚨" }
        }
        Some("修理票") => BadgeStyle { color: "bg-orange-100 text-orange-800", icon: "🔧" },
        Some("作業票") => BadgeStyle { color: "bg-blue-100 text-blue-800", icon: "⚙️" },
        Some("連絡票") => BadgeStyle { color: "bg-green-100 text-green-800", icon: "📝" },
        _ => DEFAULT_BADGE,
    }
}
