/// One entry of the standard well-service checklist seeded into every new
/// project.
#[derive(Debug, Clone, Copy)]
pub struct StandardTask {
    pub code: &'static str,
    pub title: &'static str,
    pub category: &'static str,
}

/// Standard checklist generated for every new project, in execution order.
pub const STANDARD_TASKS: &[StandardTask] = &[
    StandardTask {
        code: "CS-01",
        title: "Contract & Work Order Review",
        category: "Pre-Job",
    },
    StandardTask {
        code: "CS-02",
        title: "Job Safety Analysis",
        category: "HSE",
    },
    StandardTask {
        code: "CS-03",
        title: "HSE Committee Meeting",
        category: "HSE",
    },
    StandardTask {
        code: "CS-04",
        title: "Management Walkthrough (MWT)",
        category: "HSE",
    },
    StandardTask {
        code: "CS-05",
        title: "Equipment Mobilization",
        category: "Mobilization",
    },
    StandardTask {
        code: "CS-06",
        title: "Rig-Up & Pre-Job Inspection",
        category: "Execution",
    },
    StandardTask {
        code: "CS-07",
        title: "Pressure Test",
        category: "Execution",
    },
    StandardTask {
        code: "CS-08",
        title: "Service Execution Log",
        category: "Execution",
    },
    StandardTask {
        code: "CS-09",
        title: "Equipment Demobilization",
        category: "Rig-Down",
    },
    StandardTask {
        code: "CS-10",
        title: "Post-Job Equipment Inspection",
        category: "Rig-Down",
    },
    StandardTask {
        code: "CS-11",
        title: "Final Job Report",
        category: "Close-Out",
    },
    StandardTask {
        code: "CS-12",
        title: "Client Acceptance Sign-Off",
        category: "Close-Out",
    },
];
