//! Month and year composition of the daily aggregator.

use super::daily::summarize_day;
use crate::errors::AppResult;
use crate::models::pause::Break;
use crate::models::settings::Settings;
use crate::models::summary::{
    DayOverview, MonthOverview, PeriodTotals, ProjectRollup, TaskRollup, YearMonth, YearSummary,
};
use crate::models::work_interval::WorkInterval;
use crate::utils::date::{all_days_of_month, is_working_day, previous_day};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, HashMap};

pub const UNASSIGNED: &str = "Unassigned";

fn group_by_date<T: Clone>(rows: &[T], date_of: impl Fn(&T) -> NaiveDate) -> HashMap<NaiveDate, Vec<T>> {
    let mut map: HashMap<NaiveDate, Vec<T>> = HashMap::new();
    for row in rows {
        map.entry(date_of(row)).or_default().push(row.clone());
    }
    map
}

/// Build the month view.
///
/// `intervals` must also cover the last day of the previous month: the rest
/// check of day 1 looks at it. Rows outside that window are ignored.
pub fn month_overview(
    year: i32,
    month: u32,
    intervals: &[WorkInterval],
    breaks: &[Break],
    settings: &Settings,
    now: NaiveDateTime,
) -> AppResult<MonthOverview> {
    let dates = all_days_of_month(year, month)?;
    let work_by_date = group_by_date(intervals, |wi| wi.date);
    let breaks_by_date = group_by_date(breaks, |b| b.date);
    let none_work: Vec<WorkInterval> = Vec::new();
    let none_breaks: Vec<Break> = Vec::new();

    let mut totals = PeriodTotals::default();
    let mut days = Vec::with_capacity(dates.len());

    for d in dates {
        let prev = previous_day(d)?;
        let summary = summarize_day(
            d,
            work_by_date.get(&d).unwrap_or(&none_work),
            breaks_by_date.get(&d).unwrap_or(&none_breaks),
            work_by_date.get(&prev).unwrap_or(&none_work),
            now,
        );

        let working_day = is_working_day(d);
        if working_day {
            totals.working_days += 1;
        }
        totals.work_minutes += summary.work_minutes;
        totals.break_minutes += summary.break_minutes;
        totals.recorded_minutes += summary.recorded_minutes;

        days.push(DayOverview {
            weekday: d.weekday(),
            working_day,
            summary,
        });
    }

    totals.must_minutes = totals.working_days * settings.target_minutes_per_day();
    totals.balance_minutes = totals.recorded_minutes - totals.must_minutes;

    Ok(MonthOverview {
        year,
        month,
        days,
        totals,
    })
}

#[derive(Default)]
struct Bucket {
    name: String,
    minutes: i64,
    tasks: BTreeMap<Option<i64>, (String, i64)>,
}

fn by_minutes_then_name(a: (i64, &str), b: (i64, &str)) -> std::cmp::Ordering {
    b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1))
}

/// Minutes per project and task over closed intervals. Intervals without a
/// project land in the "Unassigned" bucket instead of being dropped.
pub fn project_rollup(intervals: &[WorkInterval]) -> Vec<ProjectRollup> {
    let mut buckets: BTreeMap<Option<i64>, Bucket> = BTreeMap::new();

    for wi in intervals {
        let Some(minutes) = wi.duration_minutes else {
            continue;
        };

        let bucket = buckets.entry(wi.project_id).or_insert_with(|| Bucket {
            name: match (wi.project_id, &wi.project_name) {
                (None, _) => UNASSIGNED.to_string(),
                (Some(_), Some(name)) => name.clone(),
                (Some(id), None) => format!("Project #{}", id),
            },
            ..Default::default()
        });
        bucket.minutes += minutes;

        let task = bucket.tasks.entry(wi.task_id).or_insert_with(|| {
            let name = wi.task_name.clone().unwrap_or_else(|| UNASSIGNED.to_string());
            (name, 0)
        });
        task.1 += minutes;
    }

    let mut projects: Vec<ProjectRollup> = buckets
        .into_iter()
        .map(|(project_id, b)| {
            let mut tasks: Vec<TaskRollup> = b
                .tasks
                .into_iter()
                .map(|(task_id, (task_name, minutes))| TaskRollup {
                    task_id,
                    task_name,
                    minutes,
                })
                .collect();
            tasks.sort_by(|x, y| {
                by_minutes_then_name((x.minutes, x.task_name.as_str()), (y.minutes, y.task_name.as_str()))
            });

            ProjectRollup {
                project_id,
                project_name: b.name,
                minutes: b.minutes,
                tasks,
            }
        })
        .collect();

    projects.sort_by(|x, y| {
        by_minutes_then_name(
            (x.minutes, x.project_name.as_str()),
            (y.minutes, y.project_name.as_str()),
        )
    });
    projects
}

/// Compose twelve month views (each with its own rollup) into a year.
pub fn year_summary(
    year: i32,
    months: Vec<(MonthOverview, Vec<ProjectRollup>)>,
    year_intervals: &[WorkInterval],
) -> YearSummary {
    let mut totals = PeriodTotals::default();

    let months = months
        .into_iter()
        .map(|(overview, projects)| {
            totals.absorb(&overview.totals);
            YearMonth {
                month: overview.month,
                totals: overview.totals,
                projects,
            }
        })
        .collect();

    let in_year: Vec<WorkInterval> = year_intervals
        .iter()
        .filter(|wi| wi.date.year() == year)
        .cloned()
        .collect();

    YearSummary {
        year,
        months,
        totals,
        projects: project_rollup(&in_year),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calculator::test_support::{brk_on, day, work_on};

    fn noon(d: &str) -> NaiveDateTime {
        day(d).and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn must_minutes_count_weekdays_only() {
        // June 2025: 30 days, 21 weekdays
        let m = month_overview(2025, 6, &[], &[], &Settings::default(), noon("2025-06-15")).unwrap();
        assert_eq!(m.days.len(), 30);
        assert_eq!(m.totals.working_days, 21);
        assert_eq!(m.totals.must_minutes, 21 * 480);

        // September 2025: 30 days, 22 weekdays
        let m = month_overview(2025, 9, &[], &[], &Settings::default(), noon("2025-09-15")).unwrap();
        assert_eq!(m.totals.working_days, 22);
        assert_eq!(m.totals.must_minutes, 10560);
    }

    #[test]
    fn target_hours_come_from_settings() {
        let settings = Settings {
            target_hours_per_day: 6,
            ..Default::default()
        };
        let m = month_overview(2025, 9, &[], &[], &settings, noon("2025-09-15")).unwrap();
        assert_eq!(m.totals.must_minutes, 22 * 360);
    }

    #[test]
    fn totals_sum_days_and_ignore_rows_outside_month() {
        let intervals = vec![
            work_on(1, "2025-09-01", "09:00", Some("17:00")),
            work_on(2, "2025-09-02", "09:00", Some("13:00")),
            work_on(3, "2025-10-01", "09:00", Some("17:00")),
        ];
        let breaks = vec![brk_on(1, "2025-09-01", None, None, 30)];
        let m = month_overview(2025, 9, &intervals, &breaks, &Settings::default(), noon("2025-09-15"))
            .unwrap();

        assert_eq!(m.totals.work_minutes, 720);
        assert_eq!(m.totals.break_minutes, 30);
        assert_eq!(m.totals.recorded_minutes, 690);
        assert_eq!(m.totals.balance_minutes, 690 - 10560);
        assert_eq!(m.days[0].summary.recorded_minutes, 450);
        assert!(m.days[0].working_day);
    }

    #[test]
    fn first_day_rest_check_sees_previous_month() {
        let intervals = vec![
            work_on(1, "2025-08-31", "18:00", Some("23:30")),
            work_on(2, "2025-09-01", "06:00", Some("12:00")),
        ];
        let m = month_overview(2025, 9, &intervals, &[], &Settings::default(), noon("2025-09-15"))
            .unwrap();
        assert_eq!(
            m.days[0].summary.warnings,
            vec!["11-hour rest rule not met: only 6h 30m".to_string()]
        );
        // August work is not part of September's totals
        assert_eq!(m.totals.work_minutes, 360);
    }

    #[test]
    fn rollup_groups_by_project_and_task_with_unassigned_bucket() {
        let mut a = work_on(1, "2025-09-01", "09:00", Some("11:00"));
        a.project_id = Some(10);
        a.project_name = Some("Apollo".into());
        a.task_id = Some(100);
        a.task_name = Some("Design".into());
        let mut b = work_on(2, "2025-09-01", "11:00", Some("12:00"));
        b.project_id = Some(10);
        b.project_name = Some("Apollo".into());
        let c = work_on(3, "2025-09-02", "09:00", Some("12:00"));
        let open = work_on(4, "2025-09-03", "09:00", None);

        let rollup = project_rollup(&[a, b, c, open]);
        assert_eq!(rollup.len(), 2);
        assert_eq!(rollup[0].project_name, "Apollo");
        assert_eq!(rollup[0].minutes, 180);
        assert_eq!(rollup[0].tasks[0].task_name, "Design");
        assert_eq!(rollup[0].tasks[0].minutes, 120);
        assert_eq!(rollup[0].tasks[1].task_name, UNASSIGNED);
        assert_eq!(rollup[1].project_id, None);
        assert_eq!(rollup[1].project_name, UNASSIGNED);
        assert_eq!(rollup[1].minutes, 180);
    }

    #[test]
    fn year_totals_add_up_months() {
        let intervals = vec![
            work_on(1, "2025-01-02", "09:00", Some("17:00")),
            work_on(2, "2025-03-03", "09:00", Some("13:00")),
        ];
        let months = (1..=12)
            .map(|m| {
                let o = month_overview(2025, m, &intervals, &[], &Settings::default(), noon("2025-06-01"))
                    .unwrap();
                (o, Vec::new())
            })
            .collect();
        let y = year_summary(2025, months, &intervals);

        assert_eq!(y.months.len(), 12);
        assert_eq!(y.totals.recorded_minutes, 720);
        assert_eq!(y.totals.working_days, 261);
        assert_eq!(y.totals.must_minutes, 261 * 480);
        assert_eq!(y.projects[0].minutes, 720);
    }
}
