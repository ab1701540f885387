//! The closed tool catalogue.
//!
//! Every tool the model may call is declared exactly once in the
//! `tool_catalog!` table below. The macro generates the [`ToolName`] enum and
//! its metadata accessors from that table, so the set of names the
//! dispatcher accepts, the metadata the registry exposes, and the list sent
//! to the model can never drift apart.
//!
//! Any string that is not a catalogue entry fails to parse with
//! [`UnknownToolError`] at the boundary; nothing downstream ever sees an
//! arbitrary tool name.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::ToolCategory;

/// A tool name that is not in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown tool: {0}")]
pub struct UnknownToolError(pub String);

/// Generates [`ToolName`] and its metadata from a catalogue table.
///
/// Each row is:
///
/// ```ignore
/// Variant => "wire_name", Category, stub: bool, "description", ["required", "params"];
/// ```
macro_rules! tool_catalog {
    ($(
        $variant:ident => $name:literal, $category:ident, stub: $stub:literal,
        $description:literal, [$($param:literal),* $(,)?];
    )+) => {
        /// Identifier of a catalogued tool.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ToolName {
            $($variant,)+
        }

        impl ToolName {
            /// Every catalogued tool, in table order.
            pub const ALL: &'static [ToolName] = &[$(ToolName::$variant,)+];

            /// Wire name the model uses.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(ToolName::$variant => $name,)+
                }
            }

            /// Business area of the tool.
            pub fn category(&self) -> ToolCategory {
                match self {
                    $(ToolName::$variant => ToolCategory::$category,)+
                }
            }

            /// Whether the tool is discoverable but intentionally disabled.
            pub fn is_stub(&self) -> bool {
                match self {
                    $(ToolName::$variant => $stub,)+
                }
            }

            /// Model-facing description.
            pub fn description(&self) -> &'static str {
                match self {
                    $(ToolName::$variant => $description,)+
                }
            }

            /// Input keys the tool cannot run without.
            pub fn required_params(&self) -> &'static [&'static str] {
                match self {
                    $(ToolName::$variant => &[$($param),*],)+
                }
            }
        }

        impl FromStr for ToolName {
            type Err = UnknownToolError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(ToolName::$variant),)+
                    other => Err(UnknownToolError(other.to_string())),
                }
            }
        }
    };
}

tool_catalog! {
    // Property
    GetProperty => "get_property", Property, stub: false,
        "Get full details of one property owned by the current user.", ["property_id"];
    ListProperties => "list_properties", Property, stub: false,
        "List the current user's properties with occupancy status.", [];
    CreateProperty => "create_property", Property, stub: false,
        "Add a new property to the portfolio.", ["address_line_1", "suburb", "state", "postcode"];
    UpdateProperty => "update_property", Property, stub: false,
        "Update property attributes such as rent, bedrooms or status.", ["property_id"];
    GetPropertySummary => "get_property_summary", Property, stub: false,
        "Summarise a property's tenancy, arrears and open maintenance in one view.", ["property_id"];

    // Tenancy
    GetTenancy => "get_tenancy", Tenancy, stub: false,
        "Get a tenancy with its tenants, rent amount and dates.", ["tenancy_id"];
    ListTenancies => "list_tenancies", Tenancy, stub: false,
        "List tenancies, optionally filtered by property or status.", [];
    CreateTenancy => "create_tenancy", Tenancy, stub: false,
        "Create a tenancy for a property and link its tenants.", ["property_id", "start_date", "rent_amount"];
    EndTenancy => "end_tenancy", Tenancy, stub: false,
        "Mark a tenancy as ended and release the property.", ["tenancy_id", "end_date"];
    GetTenancyDocuments => "get_tenancy_documents", Tenancy, stub: false,
        "Fetch a tenancy's documents, rent history and increases together.", ["tenancy_id"];
    RecordRentIncrease => "record_rent_increase", Tenancy, stub: false,
        "Record a rent increase with its effective date and notice date.", ["tenancy_id", "new_amount", "effective_date"];

    // Tenant
    GetTenant => "get_tenant", Tenant, stub: false,
        "Get a tenant's contact details and tenancy links.", ["tenant_id"];
    ListTenants => "list_tenants", Tenant, stub: false,
        "List tenants across the portfolio or for one property.", [];
    InviteTenant => "invite_tenant", Tenant, stub: false,
        "Invite a tenant to the app for an existing tenancy.", ["tenancy_id", "email"];

    // Payment
    GetRentHistory => "get_rent_history", Payment, stub: false,
        "Get rent payments for a tenancy, newest first.", ["tenancy_id"];
    RecordPayment => "record_payment", Payment, stub: false,
        "Record a rent payment received for a tenancy.", ["tenancy_id", "amount", "paid_date"];
    GetArrears => "get_arrears", Payment, stub: false,
        "Get current arrears and prior escalation actions for a tenancy.", ["tenancy_id"];
    LogArrearsAction => "log_arrears_action", Payment, stub: false,
        "Record an escalation action taken on an arrears record.", ["arrears_id", "action_type"];
    CreatePaymentPlan => "create_payment_plan", Payment, stub: false,
        "Create an instalment plan to clear arrears.", ["arrears_id", "instalment_amount", "frequency"];
    GetPaymentSummary => "get_payment_summary", Payment, stub: false,
        "Summarise rent collected and outstanding across the portfolio.", [];

    // Maintenance
    CreateMaintenanceRequest => "create_maintenance_request", Maintenance, stub: false,
        "Log a maintenance request against a property.", ["property_id", "title", "urgency"];
    GetMaintenanceRequest => "get_maintenance_request", Maintenance, stub: false,
        "Get a maintenance request with quotes and assigned trade.", ["request_id"];
    ListMaintenanceRequests => "list_maintenance_requests", Maintenance, stub: false,
        "List maintenance requests, optionally filtered by property or status.", [];
    UpdateMaintenanceStatus => "update_maintenance_status", Maintenance, stub: false,
        "Move a maintenance request to a new status.", ["request_id", "status"];
    ApproveQuote => "approve_quote", Maintenance, stub: false,
        "Approve a trade's quote for a maintenance request.", ["quote_id"];

    // Trade
    AssignTrade => "assign_trade", Trade, stub: false,
        "Assign a trade from the owner's network to a maintenance request.", ["request_id", "trade_id"];
    ListTrades => "list_trades", Trade, stub: false,
        "List trades in the owner's network, optionally by speciality.", [];
    AddTrade => "add_trade", Trade, stub: false,
        "Add a trade to the owner's network.", ["business_name", "email", "speciality"];
    RequestTradeQuote => "request_trade_quote", Trade, stub: false,
        "Ask one or more trades to quote on a maintenance request.", ["request_id", "trade_ids"];

    // Inspection
    ScheduleInspection => "schedule_inspection", Inspection, stub: false,
        "Schedule a routine, entry or exit inspection.", ["property_id", "inspection_type", "scheduled_date"];
    GetInspection => "get_inspection", Inspection, stub: false,
        "Get an inspection with its room-by-room findings.", ["inspection_id"];
    ListInspections => "list_inspections", Inspection, stub: false,
        "List inspections for a property or the whole portfolio.", [];
    CompleteInspection => "complete_inspection", Inspection, stub: false,
        "Record inspection findings and mark it complete.", ["inspection_id"];

    // Document
    ListDocuments => "list_documents", Document, stub: false,
        "List stored documents for a property or tenancy.", [];
    GetDocument => "get_document", Document, stub: false,
        "Get one document's metadata and download link.", ["document_id"];
    UploadDocument => "upload_document", Document, stub: false,
        "Attach an uploaded file to a property or tenancy.", ["file_url", "document_type"];
    GenerateLease => "generate_lease", Document, stub: false,
        "Gather tenancy data and drafting guidance for a residential lease.", ["tenancy_id"];

    // Listing
    CreateListing => "create_listing", Listing, stub: false,
        "Create a rental listing for a vacant property.", ["property_id", "rent_amount"];
    GetListing => "get_listing", Listing, stub: false,
        "Get a listing with its application counts.", ["listing_id"];
    UpdateListing => "update_listing", Listing, stub: false,
        "Update listing copy, rent or availability.", ["listing_id"];
    PublishListing => "publish_listing", Listing, stub: false,
        "Publish a draft listing to portals.", ["listing_id"];
    ListApplications => "list_applications", Listing, stub: false,
        "List applications received for a listing.", ["listing_id"];
    ShortlistApplicant => "shortlist_applicant", Listing, stub: false,
        "Move an application onto the shortlist.", ["application_id"];

    // Compliance
    CheckCompliance => "check_compliance", Compliance, stub: false,
        "Check a property's smoke alarm, pool and safety obligations.", ["property_id"];
    GetComplianceRequirements => "get_compliance_requirements", Compliance, stub: false,
        "List statutory requirements for the property's state.", ["property_id"];
    GenerateBreachNotice => "generate_breach_notice", Compliance, stub: false,
        "Gather tenancy and arrears data for drafting a breach notice.", ["tenancy_id", "breach_type"];
    PrepareTribunalApplication => "prepare_tribunal_application", Compliance, stub: true,
        "Prepare a tribunal application pack.", ["tenancy_id"];

    // Communication
    SendEmail => "send_email", Communication, stub: false,
        "Send an email for an allowed context type to a validated recipient.", ["context_type", "to", "subject", "body"];
    SendMessage => "send_message", Communication, stub: false,
        "Send an in-app message in a conversation.", ["conversation_id", "content"];
    SendNotification => "send_notification", Communication, stub: false,
        "Push a notification to the current user's devices.", ["title", "body"];
    GetConversations => "get_conversations", Communication, stub: false,
        "List in-app conversations with latest messages.", [];
    SendSms => "send_sms", Communication, stub: true,
        "Send an SMS to a tenant.", ["tenant_id", "body"];

    // Memory
    RememberPreference => "remember_preference", Memory, stub: false,
        "Store a preference the user stated or that was inferred.", ["category", "key", "value"];
    RecallPreferences => "recall_preferences", Memory, stub: false,
        "Recall stored preferences relevant to a query or category.", [];
    SearchPrecedent => "search_precedent", Memory, stub: false,
        "Find past agent decisions similar to the current situation.", [];

    // Workflow
    WorkflowFindTenant => "workflow_find_tenant", Workflow, stub: false,
        "Plan the steps to list a vacant property and select a tenant.", ["property_id"];
    WorkflowOnboardTenant => "workflow_onboard_tenant", Workflow, stub: false,
        "Plan the steps to sign, invite and move in a new tenant.", ["property_id"];
    WorkflowEndTenancy => "workflow_end_tenancy", Workflow, stub: false,
        "Plan notice, exit inspection, bond and re-listing for an ending tenancy.", ["tenancy_id"];
    WorkflowMaintenanceLifecycle => "workflow_maintenance_lifecycle", Workflow, stub: false,
        "Plan quoting, approval, assignment and completion for a maintenance request.", ["request_id"];
    WorkflowArrearsEscalation => "workflow_arrears_escalation", Workflow, stub: false,
        "Recommend the next arrears escalation step based on days overdue and prior actions.", ["tenancy_id"];

    // Analytics
    GetFinancialReport => "get_financial_report", Analytics, stub: false,
        "Income, expenses and yield for a period.", [];
    GetPortfolioReport => "get_portfolio_report", Analytics, stub: true,
        "Portfolio performance benchmarking report.", [];
    ForecastCashflow => "forecast_cashflow", Analytics, stub: true,
        "Project cashflow over the next twelve months.", [];
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ToolName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ToolName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
