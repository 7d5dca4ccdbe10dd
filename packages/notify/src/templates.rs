//! HTML bodies for the two outbound notification kinds.

use csms_core::{Project, Schedule, Task};

/// Incomplete tasks listed in the reminder body before truncation.
const MAX_LISTED_TASKS: usize = 10;

pub fn schedule_subject(schedule: &Schedule) -> String {
    format!("Schedule Notification: {}", schedule.project_name)
}

/// Body for a schedule assignment notification
pub fn schedule_notification(schedule: &Schedule) -> String {
    format!(
        r#"<html>
<body style="font-family: Arial, sans-serif; padding: 20px;">
    <div style="background: #E50914; color: white; padding: 20px; border-radius: 8px;">
        <h2 style="margin: 0;">CSMS Schedule Notification</h2>
    </div>
    <div style="padding: 20px; background: #f5f5f5; border-radius: 8px; margin-top: 10px;">
        <p>Dear <strong>{pic_name}</strong>,</p>
        <p>You have been assigned to the following schedule:</p>
        <table style="width: 100%; border-collapse: collapse;">
            <tr style="background: #fff;">
                <td style="padding: 10px; border: 1px solid #ddd;"><strong>Project</strong></td>
                <td style="padding: 10px; border: 1px solid #ddd;">{project_name}</td>
            </tr>
            <tr style="background: #fff;">
                <td style="padding: 10px; border: 1px solid #ddd;"><strong>Well</strong></td>
                <td style="padding: 10px; border: 1px solid #ddd;">{well_name}</td>
            </tr>
            <tr style="background: #fff;">
                <td style="padding: 10px; border: 1px solid #ddd;"><strong>MWT Plan Date</strong></td>
                <td style="padding: 10px; border: 1px solid #ddd; color: #E50914; font-weight: bold;">{mwt_plan_date}</td>
            </tr>
            <tr style="background: #fff;">
                <td style="padding: 10px; border: 1px solid #ddd;"><strong>HSE Committee Meeting</strong></td>
                <td style="padding: 10px; border: 1px solid #ddd; color: #46D369; font-weight: bold;">{hse_meeting_date}</td>
            </tr>
        </table>
        <p style="margin-top: 20px;">Please mark these dates in your calendar.</p>
        <p>Best regards,<br><strong>CSMS Project Management System</strong></p>
    </div>
</body>
</html>"#,
        pic_name = schedule.pic_name,
        project_name = schedule.project_name,
        well_name = schedule.well_name,
        mwt_plan_date = schedule.mwt_plan_date,
        hse_meeting_date = schedule.hse_meeting_date,
    )
}

pub fn rig_down_subject(project_name: &str) -> String {
    format!(
        "⚠️ URGENT: Rig Down Deadline Approaching - {}",
        project_name
    )
}

/// Body for a rig-down completion reminder
///
/// Lists at most [`MAX_LISTED_TASKS`] incomplete tasks; the required
/// percentage shown is the configured threshold, never a fixed value.
pub fn rig_down_reminder(
    project: &Project,
    completion_percentage: f64,
    incomplete_tasks: &[Task],
    completion_threshold: f64,
) -> String {
    let task_list: String = incomplete_tasks
        .iter()
        .take(MAX_LISTED_TASKS)
        .map(|t| {
            format!(
                "<li>{}: {}</li>",
                t.code.as_deref().unwrap_or("-"),
                t.title
            )
        })
        .collect();

    let overflow = if incomplete_tasks.len() > MAX_LISTED_TASKS {
        format!(
            "<p><em>...and {} more</em></p>",
            incomplete_tasks.len() - MAX_LISTED_TASKS
        )
    } else {
        String::new()
    };

    format!(
        r#"<html>
<body style="font-family: Arial, sans-serif; padding: 20px;">
    <div style="background: #FF6B35; color: white; padding: 20px; border-radius: 8px;">
        <h2 style="margin: 0;">⚠️ Rig Down Deadline Reminder</h2>
    </div>
    <div style="padding: 20px; background: #f5f5f5; border-radius: 8px; margin-top: 10px;">
        <p>Dear PIC,</p>
        <p><strong>Rig Down Date:</strong> {rig_down}</p>
        <p><strong>Project:</strong> {project_name}</p>
        <p><strong>Well:</strong> {well}</p>

        <div style="background: #E50914; color: white; padding: 15px; border-radius: 8px; margin: 20px 0;">
            <h3 style="margin: 0;">Task Completion: {completion:.1}%</h3>
            <p style="margin: 5px 0 0 0;">Required: {required:.0}% - Current: {completion:.1}%</p>
        </div>

        <p><strong>Incomplete Tasks ({incomplete_count}):</strong></p>
        <ul>{task_list}</ul>
        {overflow}

        <p style="color: #E50914; font-weight: bold;">Please complete the remaining tasks before the Rig Down date.</p>

        <p>Best regards,<br><strong>CSMS Project Management System</strong></p>
    </div>
</body>
</html>"#,
        rig_down = project.rig_down.as_deref().unwrap_or("N/A"),
        project_name = project.name,
        well = project.well.as_deref().unwrap_or("N/A"),
        completion = completion_percentage,
        required = completion_threshold,
        incomplete_count = incomplete_tasks.len(),
        task_list = task_list,
        overflow = overflow,
    )
}
