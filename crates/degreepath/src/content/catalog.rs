use serde::Serialize;

/// One stage of the application timeline shown on the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineStep {
    pub slug: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub items: &'static [&'static str],
}

/// Downloadable template or checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceItem {
    pub slug: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub highlights: &'static [&'static str],
}

static TIMELINE_STEPS: [TimelineStep; 6] = [
    TimelineStep {
        slug: "step-1",
        title: "定位与选校",
        subtitle: "目标 / 预算 / 专业",
        items: &["目标国家与城市", "预算与生活成本", "专业方向与课程匹配", "院校清单与优先级"],
    },
    TimelineStep {
        slug: "step-2",
        title: "语言与考试",
        subtitle: "IELTS / TestDaF 等",
        items: &["目标分数与截止时间", "备考计划", "报名与考位", "出分与复议策略"],
    },
    TimelineStep {
        slug: "step-3",
        title: "材料准备",
        subtitle: "CV / 动机信 / 推荐信",
        items: &["CV（英文/德文）", "动机信结构", "推荐人沟通", "材料版本管理"],
    },
    TimelineStep {
        slug: "step-4",
        title: "申请提交与跟进",
        subtitle: "邮件 / 系统",
        items: &["申请系统清单", "邮件模板", "时间节点追踪", "补件与面试准备"],
    },
    TimelineStep {
        slug: "step-5",
        title: "签证与资金证明",
        subtitle: "清单化",
        items: &["材料总清单", "资金证明/冻结", "预约与递签流程", "常见坑与补充材料"],
    },
    TimelineStep {
        slug: "step-6",
        title: "行前与落地",
        subtitle: "住宿 / 保险 / 开户",
        items: &["住宿与 Anmeldung", "保险选择", "开户与手机卡", "落地一周生存清单"],
    },
];

static RESOURCE_ITEMS: [ResourceItem; 6] = [
    ResourceItem {
        slug: "cv-template",
        title: "CV 模板",
        subtitle: "英文/德文简历结构",
        highlights: &["单页优先", "量化经历", "关键词匹配项目描述", "导出 PDF 统一命名"],
    },
    ResourceItem {
        slug: "motivation-letter-template",
        title: "动机信模板",
        subtitle: "结构化写作框架",
        highlights: &["开头直给目标", "匹配课程与经历", "结尾给出未来计划", "控制在 1 页内"],
    },
    ResourceItem {
        slug: "application-email-template",
        title: "申请邮件模板",
        subtitle: "教授/招生办沟通",
        highlights: &["主题行规范", "正文三段式", "附件命名统一", "礼貌跟进节奏"],
    },
    ResourceItem {
        slug: "visa-doc-checklist",
        title: "签证材料清单",
        subtitle: "递签前核对表",
        highlights: &["预约确认材料", "资金证明完整", "翻译与公证版本", "复印件备份"],
    },
    ResourceItem {
        slug: "pre-departure-checklist",
        title: "行前清单",
        subtitle: "出发前 30 天准备",
        highlights: &["住宿确认", "保险生效日期", "随身文件夹", "紧急联系人备份"],
    },
    ResourceItem {
        slug: "germany-life-toolkit",
        title: "德生活工具箱",
        subtitle: "落地后常用资源",
        highlights: &["注册流程入口", "银行/通信方案", "交通票类型", "办事预约平台"],
    },
];

pub fn timeline_steps() -> &'static [TimelineStep] {
    &TIMELINE_STEPS
}

pub fn timeline_step_by_slug(slug: &str) -> Option<&'static TimelineStep> {
    TIMELINE_STEPS.iter().find(|step| step.slug == slug)
}

pub fn resource_items() -> &'static [ResourceItem] {
    &RESOURCE_ITEMS
}

pub fn resource_by_slug(slug: &str) -> Option<&'static ResourceItem> {
    RESOURCE_ITEMS.iter().find(|item| item.slug == slug)
}
